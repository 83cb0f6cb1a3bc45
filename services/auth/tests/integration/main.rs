mod helpers;
mod redis_test;
mod router_test;
mod sweep_test;

mod router_test;
mod runner_test;

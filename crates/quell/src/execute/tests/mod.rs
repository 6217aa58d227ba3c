mod collect_tests;
mod strategy_tests;

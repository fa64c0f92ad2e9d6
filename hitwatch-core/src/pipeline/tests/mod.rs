mod parse_tests;
mod run_tests;

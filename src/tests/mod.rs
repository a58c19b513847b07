pub mod utils;

mod cli_tests;

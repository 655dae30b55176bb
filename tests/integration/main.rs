//! Integration tests for csv2glozz

mod cli_test;
mod convert_test;
mod helpers;

//! CLI parse and output contract tests

mod output_contracts;
mod support;

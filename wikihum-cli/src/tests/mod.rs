//! Shared test harness modules for the WikiHum maintenance CLI.

use super::*;

mod execute;
mod steps;

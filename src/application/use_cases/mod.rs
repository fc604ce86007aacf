//! Use case implementations.

mod onelast_use_case;

pub use onelast_use_case::{ImageOutcome, OneLastUseCase};

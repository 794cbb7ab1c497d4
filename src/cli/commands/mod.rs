//! Command implementations, one module per subcommand.

pub mod keygen;
pub mod shell;

pub mod state;

pub use state::{StateFile, TerraformError};

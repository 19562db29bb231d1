pub mod descriptor;
pub mod instance;

pub use descriptor::{descriptor, Port, DESCRIPTOR};
pub use instance::{Instance, PortBuffer};

pub mod enums;
pub mod medication;
pub mod screening;

pub use enums::*;
pub use medication::*;
pub use screening::*;

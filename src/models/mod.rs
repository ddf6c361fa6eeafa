pub mod category;
pub mod order;
pub mod pincode;
pub mod product;

pub use category::*;
pub use order::*;
pub use pincode::*;
pub use product::*;

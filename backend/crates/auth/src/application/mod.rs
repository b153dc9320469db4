//! Application Layer (Use Cases)

pub mod login;
pub mod register;

pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};

pub mod backend;
pub mod booking_flow;
pub mod notify;
pub mod slots;
pub mod validator;

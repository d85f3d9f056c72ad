pub mod benford;
pub mod session;

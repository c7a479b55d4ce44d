pub mod company;
pub mod customer;
pub mod decision;
pub mod finance;
pub mod goal;
pub mod persona;
pub mod task;

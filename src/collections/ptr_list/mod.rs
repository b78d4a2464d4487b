mod ptr_list;
mod tests;

pub use ptr_list::*;

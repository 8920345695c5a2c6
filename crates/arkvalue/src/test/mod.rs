pub mod test_display;
pub mod test_lifecycle;
pub mod test_machine;

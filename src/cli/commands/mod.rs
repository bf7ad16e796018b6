mod extract;

pub use extract::handle_extract_command;

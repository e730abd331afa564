//! Integration tests for the nova-release binary

mod helpers;
mod test_check;
mod test_notes;
mod test_status;
mod test_tags;

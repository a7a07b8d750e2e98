pub mod quick_toggle;

//! CLI subcommand implementations for the Boutique binary.

pub mod browse_cmd;
pub mod cart_cmd;
pub mod catalog_cmd;
pub mod checkout_cmd;
pub mod output;
pub mod shop;
pub mod shop_commands;
pub mod shop_complete;

//! zabbix-jmx-get: Command-line interface for the Zabbix Java gateway
//!
//! Builds a request from command-line options and the config file, runs one
//! exchange and prints the values.

pub mod commands;
pub mod output;

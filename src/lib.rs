//! goji - a small JIRA client.
//!
//! The library holds everything that does not touch the terminal:
//! - [`config`] stores the connection credentials in `~/.goji/config.json`
//! - [`api`] turns issue drafts into REST requests and sends them
//! - [`error`] maps failures to messages for the command-line front end
//! - [`logging`] sets up file logging

pub mod api;
pub mod config;
pub mod error;
pub mod logging;

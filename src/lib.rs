// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) wires these modules together.
//
// Module responsibilities:
// - `cli`: clap definitions for the `search` / `add` / `show` subcommands
//   and the open-ended `--name value` filter grammar.
// - `query`: builds the search query (author plus ordered optional
//   filters) and renders it as a percent-encoded URL.
// - `api`: the blocking HTTP client that talks to the bibliographic
//   search endpoint and parses its JSON envelope.
// - `book`: the bibliographic record type and its fixed-order display.
// - `library`: the durable, title-keyed local library file.
// - `commands`: the three user-facing workflows gluing the above together.
pub mod api;
pub mod book;
pub mod cli;
pub mod commands;
pub mod library;
pub mod query;

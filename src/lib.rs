//! jintest: lint, render, and validate Jinja2 templates
//!
//! A template is linted for syntax and brace-balance defects, rendered with
//! JSON data in strict-undefined mode, and its output optionally checked as
//! HTML, XML, or JSON.

pub mod cli;
pub mod core;
pub mod markup;

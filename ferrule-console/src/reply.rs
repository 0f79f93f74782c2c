//! Reply rendering
//!
//! Values are shown the way an interactive interpreter shows them:
//! `=> 42`, `=> 1.5`, `=> "text"`, `=> nil`. Errors are shown as
//! `Kind: message`.

use core::fmt::Write;

use ferrule_core::{Reply, ValueSink};
use heapless::String;

use crate::console::ConsoleError;

/// Maximum rendered output length
pub const MAX_OUTPUT_LEN: usize = 128;

/// One rendered output line (without terminator)
pub type Output = String<MAX_OUTPUT_LEN>;

/// Renders replies into an [`Output`]
struct Inspect;

impl Inspect {
    fn render(args: core::fmt::Arguments<'_>) -> Output {
        let mut out = Output::new();
        // Overlong output is cut at the capacity
        let _ = out.write_fmt(args);
        out
    }
}

impl ValueSink for Inspect {
    type Output = Output;

    fn unit(self) -> Output {
        Self::render(format_args!("=> nil"))
    }

    fn integer(self, value: i64) -> Output {
        Self::render(format_args!("=> {}", value))
    }

    fn float(self, value: f64) -> Output {
        Self::render(format_args!("=> {:?}", value))
    }

    fn text(self, value: &str) -> Output {
        Self::render(format_args!("=> {:?}", value))
    }
}

/// Render a successful reply
pub fn format_reply(reply: Reply) -> Output {
    reply.marshal(Inspect)
}

/// Render an error
pub fn format_error(error: &ConsoleError) -> Output {
    Inspect::render(format_args!("{}", error))
}

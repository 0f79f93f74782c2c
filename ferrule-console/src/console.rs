//! Console evaluation
//!
//! Ties the pieces together: a line is parsed, resolved against the
//! registered namespace, and dispatched through the bridge.

use core::fmt;

use ferrule_core::{register, ArgumentError, Bridge, CallDescriptor, Reply};
use ferrule_hal::Platform;

use crate::call::{parse_call, CallExpr, ParseError};
use crate::host::{ConsoleHost, RegistrationError, ResolveError};
use crate::line::{LineError, MAX_LINE_LEN};
use crate::reply::{format_error, format_reply, Output};

/// Anything that stops a console line from producing a value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    Line(LineError),
    Parse(ParseError),
    Resolve(ResolveError),
    Argument(ArgumentError),
}

impl From<LineError> for ConsoleError {
    fn from(e: LineError) -> Self {
        ConsoleError::Line(e)
    }
}

impl From<ParseError> for ConsoleError {
    fn from(e: ParseError) -> Self {
        ConsoleError::Parse(e)
    }
}

impl From<ResolveError> for ConsoleError {
    fn from(e: ResolveError) -> Self {
        ConsoleError::Resolve(e)
    }
}

impl From<ArgumentError> for ConsoleError {
    fn from(e: ArgumentError) -> Self {
        ConsoleError::Argument(e)
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Line(LineError::Overflow) => {
                write!(f, "LineError: line longer than {} bytes", MAX_LINE_LEN)
            }
            ConsoleError::Parse(e) => write!(f, "SyntaxError: {}", ParseMessage(e)),
            ConsoleError::Resolve(ResolveError::UnknownModule(path)) => {
                write!(f, "NameError: uninitialized constant {}", path)
            }
            ConsoleError::Resolve(ResolveError::UnknownFunction { module, function }) => {
                write!(f, "NoMethodError: undefined method '{}' for {}", function, module)
            }
            ConsoleError::Argument(e) => write!(f, "ArgumentError: {}", e),
        }
    }
}

/// Human-readable parse error
struct ParseMessage<'a>(&'a ParseError);

impl fmt::Display for ParseMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ParseError::Empty => f.write_str("empty input"),
            ParseError::ExpectedName => f.write_str("expected module name"),
            ParseError::ExpectedFunction => f.write_str("expected '.function'"),
            ParseError::ExpectedArgument => f.write_str("expected argument"),
            ParseError::PathTooDeep => f.write_str("module path too deep"),
            ParseError::TooManyArguments => f.write_str("too many arguments"),
            ParseError::InvalidNumber => f.write_str("invalid number"),
            ParseError::UnterminatedString => f.write_str("unterminated string"),
            ParseError::UnclosedParen => f.write_str("expected ')'"),
            ParseError::UnexpectedCharacter(c) => write!(f, "unexpected '{}'", c),
        }
    }
}

/// Console front end over a registered namespace
#[derive(Debug, Clone)]
pub struct Console {
    host: ConsoleHost,
}

impl Console {
    /// Register the bridge under `root` and build a console over it
    pub fn new(root: &str) -> Result<Self, RegistrationError> {
        let mut host = ConsoleHost::new();
        register(&mut host, root)?;
        Ok(Self { host })
    }

    /// The namespace table
    pub fn host(&self) -> &ConsoleHost {
        &self.host
    }

    /// Parse and resolve a line without calling anything
    pub fn prepare<'a>(
        &self,
        line: &'a str,
    ) -> Result<(&'static CallDescriptor, CallExpr<'a>), ConsoleError> {
        let call = parse_call(line)?;
        let descriptor = self.host.resolve(&call)?;
        Ok((descriptor, call))
    }

    /// Run one line through the bridge
    pub async fn execute<P: Platform>(
        &self,
        bridge: &mut Bridge<P>,
        line: &str,
    ) -> Result<Reply, ConsoleError> {
        let (descriptor, call) = self.prepare(line)?;
        Ok(bridge.call(descriptor, &call.args).await?)
    }

    /// Run one line and render the response
    ///
    /// Blank lines produce no output.
    pub async fn evaluate<P: Platform>(
        &self,
        bridge: &mut Bridge<P>,
        line: &str,
    ) -> Option<Output> {
        if line.trim().is_empty() {
            return None;
        }
        Some(match self.execute(bridge, line).await {
            Ok(reply) => format_reply(reply),
            Err(e) => format_error(&e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embassy_futures::block_on;
    use ferrule_hal::{ChipInfo, ChipModel, MonotonicTimer, SystemControl, TickDelay};
    use std::panic::{catch_unwind, AssertUnwindSafe};

    struct BoardStub {
        waited_ms: u64,
        clock: Cell<u64>,
    }

    impl BoardStub {
        fn new() -> Self {
            Self {
                waited_ms: 0,
                clock: Cell::new(0),
            }
        }
    }

    impl SystemControl for BoardStub {
        fn free_heap_bytes(&self) -> usize {
            30_212
        }

        fn sdk_version(&self) -> &str {
            "ferrule-hal-rp2040/0.1.0"
        }

        fn chip_info(&self) -> ChipInfo {
            ChipInfo::new(ChipModel(2))
        }

        fn restart(&mut self) -> ! {
            panic!("restart")
        }

        fn deep_sleep(&mut self, duration_us: u64) -> ! {
            panic!("deep sleep {}", duration_us)
        }
    }

    impl TickDelay for BoardStub {
        fn tick_period_ms(&self) -> u32 {
            10
        }

        async fn delay_ticks(&mut self, ticks: u64) {
            self.waited_ms += ticks * 10;
        }
    }

    impl MonotonicTimer for BoardStub {
        fn now_us(&self) -> u64 {
            let now = self.clock.get() + 1_500;
            self.clock.set(now);
            now
        }
    }

    fn eval(
        console: &Console,
        bridge: &mut Bridge<BoardStub>,
        line: &str,
    ) -> Option<std::string::String> {
        block_on(console.evaluate(bridge, line)).map(|out| out.as_str().into())
    }

    #[test]
    fn test_session() {
        let console = Console::new("RP2040").unwrap();
        let mut bridge = Bridge::new(BoardStub::new());

        assert_eq!(
            eval(&console, &mut bridge, "RP2040::System.delay(105)").as_deref(),
            Some("=> nil")
        );
        assert_eq!(bridge.platform().waited_ms, 100);

        assert_eq!(
            eval(&console, &mut bridge, "System.available_memory").as_deref(),
            Some("=> 30212")
        );
        assert_eq!(
            eval(&console, &mut bridge, "System.sdk_version()").as_deref(),
            Some("=> \"ferrule-hal-rp2040/0.1.0\"")
        );
        assert_eq!(eval(&console, &mut bridge, "System.chip_model").as_deref(), Some("=> 2"));
        assert_eq!(eval(&console, &mut bridge, "Timer.get_time").as_deref(), Some("=> 1500.0"));
        assert_eq!(eval(&console, &mut bridge, "   ").as_deref(), None);
    }

    #[test]
    fn test_error_lines() {
        let console = Console::new("RP2040").unwrap();
        let mut bridge = Bridge::new(BoardStub::new());

        assert_eq!(
            eval(&console, &mut bridge, "System.delay").as_deref(),
            Some("ArgumentError: wrong number of arguments (given 0, expected 1)")
        );
        assert_eq!(
            eval(&console, &mut bridge, "System.delay(\"1\")").as_deref(),
            Some("ArgumentError: argument 1: can't convert String into Integer")
        );
        assert_eq!(
            eval(&console, &mut bridge, "Gpio.write(1)").as_deref(),
            Some("NameError: uninitialized constant Gpio")
        );
        assert_eq!(
            eval(&console, &mut bridge, "Timer.sleep").as_deref(),
            Some("NoMethodError: undefined method 'sleep' for RP2040::Timer")
        );
        assert_eq!(
            eval(&console, &mut bridge, "System.delay(1").as_deref(),
            Some("SyntaxError: expected ')'")
        );
        assert_eq!(bridge.platform().waited_ms, 0);
    }

    #[test]
    fn test_restart_ends_the_session() {
        let console = Console::new("RP2040").unwrap();
        let mut bridge = Bridge::new(BoardStub::new());
        let mut outputs = 0;

        let result = catch_unwind(AssertUnwindSafe(|| {
            for line in ["System.chip_model", "System.restart", "System.chip_model"] {
                if eval(&console, &mut bridge, line).is_some() {
                    outputs += 1;
                }
            }
        }));

        assert!(result.is_err());
        assert_eq!(outputs, 1);
    }

    #[test]
    fn test_prepare_does_not_call() {
        let console = Console::new("RP2040").unwrap();
        let (descriptor, call) = console.prepare("System.deep_sleep_for 5000000").unwrap();
        assert_eq!(descriptor.name, "deep_sleep_for");
        assert_eq!(call.args.len(), 1);
    }
}

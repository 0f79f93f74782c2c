//! Host-call bridge
//!
//! [`Bridge::call`] is the single entry point used by scripting runtimes:
//! it validates the arguments against the descriptor, runs exactly one
//! platform operation, and returns the marshaled result. Arguments are
//! fully validated before the platform is touched, so a rejected call has
//! no side effects.

use ferrule_hal::Platform;
use heapless::Vec;

use crate::args::{ArgKind, Argument};
use crate::error::ArgumentError;
use crate::registry::{Arity, CallDescriptor, Operation};
use crate::value::{Reply, Value};

/// Largest arity of any entry point
pub const MAX_ARITY: usize = 2;

/// Validated integer arguments
pub type IntArgs = Vec<u64, MAX_ARITY>;

/// Convert milliseconds to scheduler ticks
///
/// Integer division: the sub-tick remainder is dropped, never rounded up.
/// A zero tick period is treated as one millisecond.
pub fn ms_to_ticks(ms: u64, tick_period_ms: u32) -> u64 {
    ms / u64::from(tick_period_ms.max(1))
}

/// Check `args` against `arity`
///
/// Every argument must be a non-negative integer. The count is checked
/// first, then each argument in order.
pub fn validate(arity: Arity, args: &[Argument<'_>]) -> Result<IntArgs, ArgumentError> {
    let expected = arity.count();
    let wrong_count = ArgumentError::WrongCount {
        given: args.len(),
        expected,
    };

    if args.len() != usize::from(expected) {
        return Err(wrong_count);
    }

    let mut values = IntArgs::new();
    for (index, arg) in args.iter().enumerate() {
        let value = match *arg {
            Argument::Integer(value) if value < 0 => {
                return Err(ArgumentError::OutOfRange { index, value });
            }
            Argument::Integer(value) => value as u64,
            other => {
                return Err(ArgumentError::WrongType {
                    index,
                    expected: ArgKind::Integer,
                    given: other.kind(),
                });
            }
        };
        values.push(value).map_err(|_| wrong_count)?;
    }

    Ok(values)
}

/// Bridge between a scripting runtime and a platform
///
/// Owns the platform handle; carries no other state.
pub struct Bridge<P> {
    platform: P,
}

impl<P: Platform> Bridge<P> {
    /// Create a bridge over `platform`
    pub const fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Borrow the platform
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutably borrow the platform
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Consume the bridge and return the platform
    pub fn into_inner(self) -> P {
        self.platform
    }

    /// Invoke the entry point described by `descriptor`
    ///
    /// Terminal operations (`restart`, `deep_sleep_for`) do not return once
    /// their arguments are accepted.
    pub async fn call(
        &mut self,
        descriptor: &CallDescriptor,
        args: &[Argument<'_>],
    ) -> Result<Reply, ArgumentError> {
        let values = validate(descriptor.arity, args)?;
        let first = values.first().copied().unwrap_or_default();

        let reply = match descriptor.operation {
            Operation::Delay => {
                self.delay(first).await;
                Reply::Unit
            }
            Operation::AvailableMemory => Value::Integer(self.available_memory()).into(),
            Operation::SdkVersion => self.sdk_version().into(),
            Operation::Restart => self.restart(),
            Operation::DeepSleepFor => self.deep_sleep_for(first),
            Operation::TimerNow => Value::Float(self.timer_now()).into(),
            Operation::ChipModel => Value::Integer(self.chip_model()).into(),
        };

        Ok(reply)
    }

    /// Suspend the caller for `ms` milliseconds, rounded down to whole ticks
    pub async fn delay(&mut self, ms: u64) {
        let ticks = ms_to_ticks(ms, self.platform.tick_period_ms());
        self.platform.delay_ticks(ticks).await;
    }

    /// Free heap bytes
    pub fn available_memory(&self) -> i64 {
        i64::try_from(self.platform.free_heap_bytes()).unwrap_or(i64::MAX)
    }

    /// Platform SDK version string
    pub fn sdk_version(&self) -> Value {
        Value::text(self.platform.sdk_version())
    }

    /// Warm-reset the device
    pub fn restart(&mut self) -> ! {
        self.platform.restart()
    }

    /// Enter deep sleep for `us` microseconds
    pub fn deep_sleep_for(&mut self, us: u64) -> ! {
        self.platform.deep_sleep(us)
    }

    /// Microseconds since boot, as a double
    ///
    /// The 64-bit counter can exceed a script integer's exact range, hence
    /// the float.
    pub fn timer_now(&self) -> f64 {
        self.platform.now_us() as f64
    }

    /// Opaque chip model code
    pub fn chip_model(&self) -> i64 {
        i64::from(self.platform.chip_info().model.code())
    }
}

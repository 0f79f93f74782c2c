//! Fixed dispatch table
//!
//! Every entry point the bridge exposes is listed in [`ENTRY_POINTS`].
//! The table is built at compile time and never changes; there is no way
//! to add entry points at runtime.

/// Number of arguments an entry point takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arity {
    /// No arguments
    None,
    /// Exactly this many integer arguments
    Required(u8),
}

impl Arity {
    /// Number of arguments expected
    pub fn count(self) -> u8 {
        match self {
            Arity::None => 0,
            Arity::Required(n) => n,
        }
    }
}

/// Script-visible modules under the root namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Module {
    System,
    Timer,
}

impl Module {
    /// All modules, in registration order
    pub const ALL: [Module; 2] = [Module::System, Module::Timer];

    /// Module name as seen by scripts
    pub fn name(self) -> &'static str {
        match self {
            Module::System => "System",
            Module::Timer => "Timer",
        }
    }

    /// Look up a module by its script name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// Native operation behind an entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    Delay,
    AvailableMemory,
    SdkVersion,
    Restart,
    DeepSleepFor,
    TimerNow,
    ChipModel,
}

impl Operation {
    /// Check if this operation ends forward execution
    pub fn is_terminal(self) -> bool {
        matches!(self, Operation::Restart | Operation::DeepSleepFor)
    }
}

/// Static description of one entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CallDescriptor {
    /// Module the function lives in
    pub module: Module,
    /// Function name
    pub name: &'static str,
    /// Expected arguments
    pub arity: Arity,
    /// Native operation
    pub operation: Operation,
}

impl CallDescriptor {
    const fn new(module: Module, name: &'static str, arity: Arity, operation: Operation) -> Self {
        Self {
            module,
            name,
            arity,
            operation,
        }
    }
}

/// All entry points, in registration order
pub const ENTRY_POINTS: [CallDescriptor; 7] = [
    CallDescriptor::new(Module::System, "delay", Arity::Required(1), Operation::Delay),
    CallDescriptor::new(
        Module::System,
        "available_memory",
        Arity::None,
        Operation::AvailableMemory,
    ),
    CallDescriptor::new(Module::System, "sdk_version", Arity::None, Operation::SdkVersion),
    CallDescriptor::new(Module::System, "restart", Arity::None, Operation::Restart),
    CallDescriptor::new(
        Module::System,
        "deep_sleep_for",
        Arity::Required(1),
        Operation::DeepSleepFor,
    ),
    CallDescriptor::new(Module::System, "chip_model", Arity::None, Operation::ChipModel),
    CallDescriptor::new(Module::Timer, "get_time", Arity::None, Operation::TimerNow),
];

/// Entry points belonging to `module`
pub fn entry_points(module: Module) -> impl Iterator<Item = &'static CallDescriptor> {
    ENTRY_POINTS.iter().filter(move |d| d.module == module)
}

/// Find the entry point `module.name`
pub fn lookup(module: Module, name: &str) -> Option<&'static CallDescriptor> {
    entry_points(module).find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let delay = lookup(Module::System, "delay").unwrap();
        assert_eq!(delay.operation, Operation::Delay);
        assert_eq!(delay.arity, Arity::Required(1));

        let now = lookup(Module::Timer, "get_time").unwrap();
        assert_eq!(now.operation, Operation::TimerNow);

        assert!(lookup(Module::Timer, "delay").is_none());
        assert!(lookup(Module::System, "get_time").is_none());
    }

    #[test]
    fn test_each_operation_appears_once() {
        let ops = [
            Operation::Delay,
            Operation::AvailableMemory,
            Operation::SdkVersion,
            Operation::Restart,
            Operation::DeepSleepFor,
            Operation::TimerNow,
            Operation::ChipModel,
        ];
        for op in ops {
            let count = ENTRY_POINTS.iter().filter(|d| d.operation == op).count();
            assert_eq!(count, 1, "{:?}", op);
        }
    }

    #[test]
    fn test_names_unique_within_module() {
        for module in Module::ALL {
            for d in entry_points(module) {
                assert_eq!(entry_points(module).filter(|o| o.name == d.name).count(), 1);
            }
        }
    }

    #[test]
    fn test_arity_matches_operation() {
        for d in ENTRY_POINTS.iter() {
            let expected = match d.operation {
                Operation::Delay | Operation::DeepSleepFor => 1,
                _ => 0,
            };
            assert_eq!(d.arity.count(), expected, "{}", d.name);
        }
    }

    #[test]
    fn test_module_names() {
        assert_eq!(Module::from_name("System"), Some(Module::System));
        assert_eq!(Module::from_name("Timer"), Some(Module::Timer));
        assert_eq!(Module::from_name("system"), None);
    }

    #[test]
    fn test_terminal_operations() {
        assert!(Operation::Restart.is_terminal());
        assert!(Operation::DeepSleepFor.is_terminal());
        assert!(!Operation::Delay.is_terminal());
    }
}

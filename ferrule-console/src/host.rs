//! Namespace table for the console
//!
//! [`ConsoleHost`] is the console's [`ScriptHost`]: registration records
//! each module under its fully-qualified path (`RP2040::System`) and each
//! function against its module. Parsed calls are then resolved against
//! this table, either by full path or relative to the root namespace.

use ferrule_core::{CallDescriptor, ScriptHost};
use heapless::{String, Vec};

use crate::call::CallExpr;

/// Maximum number of modules (root included)
pub const MAX_MODULES: usize = 8;

/// Maximum number of registered functions
pub const MAX_FUNCTIONS: usize = 16;

/// Maximum fully-qualified module path length
pub const MAX_MODULE_PATH_LEN: usize = 48;

/// Maximum function name length kept for error reports
pub const MAX_FUNCTION_NAME_LEN: usize = 32;

/// Path separator between nested modules
const SEPARATOR: &str = "::";

/// Fully-qualified module path
pub type ModulePath = String<MAX_MODULE_PATH_LEN>;

/// Errors while registering into the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationError {
    /// Module table is full
    TooManyModules,
    /// Function table is full
    TooManyFunctions,
    /// Qualified module path does not fit
    PathTooLong,
}

/// Errors while resolving a parsed call
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResolveError {
    /// No module matches the call's path
    UnknownModule(ModulePath),
    /// Module exists but has no such function
    UnknownFunction {
        module: ModulePath,
        function: String<MAX_FUNCTION_NAME_LEN>,
    },
}

/// Handle to a module defined in a [`ConsoleHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleId(usize);

/// Registered function
#[derive(Debug, Clone, Copy)]
struct FunctionEntry {
    module: ModuleId,
    descriptor: &'static CallDescriptor,
}

/// Console-side namespace table
#[derive(Debug, Clone, Default)]
pub struct ConsoleHost {
    modules: Vec<ModulePath, MAX_MODULES>,
    functions: Vec<FunctionEntry, MAX_FUNCTIONS>,
}

impl ConsoleHost {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            modules: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Qualified paths of all defined modules, in definition order
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.as_str())
    }

    /// Descriptors registered under the module at `path`
    pub fn functions<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = &'static CallDescriptor> + 'a {
        let id = self.modules.iter().position(|m| m.as_str() == path);
        self.functions
            .iter()
            .filter(move |f| Some(f.module.0) == id)
            .map(|f| f.descriptor)
    }

    /// Number of registered functions
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Find the descriptor a parsed call refers to
    ///
    /// An exact path match wins; otherwise the first module whose path ends
    /// with the call's path is used, so `System.delay` finds
    /// `RP2040::System.delay`.
    pub fn resolve(&self, call: &CallExpr<'_>) -> Result<&'static CallDescriptor, ResolveError> {
        let module = self
            .find_module(&call.path)
            .ok_or_else(|| ResolveError::UnknownModule(join_path(&call.path)))?;

        self.functions
            .iter()
            .find(|f| f.module == module && f.descriptor.name == call.function)
            .map(|f| f.descriptor)
            .ok_or_else(|| ResolveError::UnknownFunction {
                module: self.modules[module.0].clone(),
                function: truncated(call.function),
            })
    }

    fn find_module(&self, path: &[&str]) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|m| path_matches(m, path, true))
            .or_else(|| self.modules.iter().position(|m| path_matches(m, path, false)))
            .map(ModuleId)
    }
}

impl ScriptHost for ConsoleHost {
    type Module = ModuleId;
    type Error = RegistrationError;

    fn define_module(
        &mut self,
        parent: Option<&ModuleId>,
        name: &str,
    ) -> Result<ModuleId, RegistrationError> {
        let mut path = ModulePath::new();
        if let Some(parent) = parent {
            path.push_str(&self.modules[parent.0])
                .and_then(|_| path.push_str(SEPARATOR))
                .map_err(|_| RegistrationError::PathTooLong)?;
        }
        path.push_str(name)
            .map_err(|_| RegistrationError::PathTooLong)?;

        // Defining an existing module reopens it
        if let Some(existing) = self.modules.iter().position(|m| *m == path) {
            return Ok(ModuleId(existing));
        }

        self.modules
            .push(path)
            .map_err(|_| RegistrationError::TooManyModules)?;
        Ok(ModuleId(self.modules.len() - 1))
    }

    fn define_function(
        &mut self,
        module: &ModuleId,
        descriptor: &'static CallDescriptor,
    ) -> Result<(), RegistrationError> {
        self.functions
            .push(FunctionEntry {
                module: *module,
                descriptor,
            })
            .map_err(|_| RegistrationError::TooManyFunctions)
    }
}

/// Compare a qualified module path with call segments, from the innermost out
fn path_matches(qualified: &str, path: &[&str], exact: bool) -> bool {
    let mut segments = qualified.rsplit(SEPARATOR);
    for wanted in path.iter().rev() {
        match segments.next() {
            Some(segment) if segment == *wanted => {}
            _ => return false,
        }
    }
    !exact || segments.next().is_none()
}

fn join_path(path: &[&str]) -> ModulePath {
    let mut joined = ModulePath::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 && joined.push_str(SEPARATOR).is_err() {
            break;
        }
        if joined.push_str(segment).is_err() {
            break;
        }
    }
    joined
}

fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::parse_call;
    use ferrule_core::{register, Operation};

    fn registered(root: &str) -> ConsoleHost {
        let mut host = ConsoleHost::new();
        register(&mut host, root).unwrap();
        host
    }

    #[test]
    fn test_registration_layout() {
        let host = registered("RP2040");
        let modules: std::vec::Vec<_> = host.modules().collect();
        assert_eq!(modules, ["RP2040", "RP2040::System", "RP2040::Timer"]);
        assert_eq!(host.function_count(), 7);
        assert_eq!(host.functions("RP2040::System").count(), 6);
        assert_eq!(host.functions("RP2040::Timer").count(), 1);
        assert_eq!(host.functions("RP2040").count(), 0);
    }

    #[test]
    fn test_resolve_full_and_relative_paths() {
        let host = registered("ESP32");

        let call = parse_call("ESP32::System.delay(1)").unwrap();
        assert_eq!(host.resolve(&call).unwrap().operation, Operation::Delay);

        let call = parse_call("System.delay(1)").unwrap();
        assert_eq!(host.resolve(&call).unwrap().operation, Operation::Delay);

        let call = parse_call("Timer.get_time").unwrap();
        assert_eq!(host.resolve(&call).unwrap().operation, Operation::TimerNow);
    }

    #[test]
    fn test_resolve_unknown_module() {
        let host = registered("ESP32");
        let call = parse_call("RP2040::System.delay(1)").unwrap();
        match host.resolve(&call) {
            Err(ResolveError::UnknownModule(path)) => assert_eq!(path.as_str(), "RP2040::System"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_unknown_function() {
        let host = registered("ESP32");
        let call = parse_call("Timer.delay(1)").unwrap();
        match host.resolve(&call) {
            Err(ResolveError::UnknownFunction { module, function }) => {
                assert_eq!(module.as_str(), "ESP32::Timer");
                assert_eq!(function.as_str(), "delay");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_partial_segment_does_not_match() {
        let host = registered("ESP32");
        let call = parse_call("Sys.delay(1)").unwrap();
        assert!(matches!(host.resolve(&call), Err(ResolveError::UnknownModule(_))));
    }

    #[test]
    fn test_reopening_module_reuses_handle() {
        let mut host = ConsoleHost::new();
        let first = host.define_module(None, "RP2040").unwrap();
        let again = host.define_module(None, "RP2040").unwrap();
        assert_eq!(first, again);
        assert_eq!(host.modules().count(), 1);
    }

    #[test]
    fn test_path_too_long() {
        let mut host = ConsoleHost::new();
        let long = "A".repeat(MAX_MODULE_PATH_LEN + 1);
        assert_eq!(
            host.define_module(None, &long),
            Err(RegistrationError::PathTooLong)
        );
    }
}

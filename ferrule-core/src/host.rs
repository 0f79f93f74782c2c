//! Registration into a scripting runtime
//!
//! The runtime supplies a [`ScriptHost`]; [`register`] walks the fixed
//! dispatch table once and defines every module and function under the
//! root namespace. Nothing is acquired, so [`finalize`] has nothing to do.

use crate::registry::{entry_points, CallDescriptor, Module};

/// Namespace registration mechanism of a scripting runtime
pub trait ScriptHost {
    /// Handle to a defined module
    type Module;

    /// Registration failure (e.g. the runtime's tables are full)
    type Error;

    /// Define module `name`, nested in `parent` or at top level
    fn define_module(
        &mut self,
        parent: Option<&Self::Module>,
        name: &str,
    ) -> Result<Self::Module, Self::Error>;

    /// Define a module function backed by `descriptor`
    fn define_function(
        &mut self,
        module: &Self::Module,
        descriptor: &'static CallDescriptor,
    ) -> Result<(), Self::Error>;
}

/// Define the root namespace, its modules, and every entry point
///
/// Produces `<root>::System` and `<root>::Timer`.
pub fn register<H: ScriptHost>(host: &mut H, root: &str) -> Result<(), H::Error> {
    let root = host.define_module(None, root)?;

    for module in Module::ALL {
        let handle = host.define_module(Some(&root), module.name())?;
        for descriptor in entry_points(module) {
            host.define_function(&handle, descriptor)?;
        }
    }

    Ok(())
}

/// Runtime shutdown hook
pub fn finalize<H: ScriptHost>(_host: &mut H) {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;
    use std::vec::Vec;

    /// Host that records qualified names in definition order
    #[derive(Default)]
    struct RecordingHost {
        modules: Vec<String>,
        functions: Vec<String>,
        capacity: Option<usize>,
    }

    impl ScriptHost for RecordingHost {
        type Module = String;
        type Error = ();

        fn define_module(&mut self, parent: Option<&String>, name: &str) -> Result<String, ()> {
            let path = match parent {
                Some(parent) => std::format!("{}::{}", parent, name),
                None => name.into(),
            };
            self.modules.push(path.clone());
            Ok(path)
        }

        fn define_function(
            &mut self,
            module: &String,
            descriptor: &'static CallDescriptor,
        ) -> Result<(), ()> {
            if Some(self.functions.len()) == self.capacity {
                return Err(());
            }
            self.functions
                .push(std::format!("{}.{}", module, descriptor.name));
            Ok(())
        }
    }

    #[test]
    fn test_register_defines_namespace() {
        let mut host = RecordingHost::default();
        register(&mut host, "ESP32").unwrap();

        assert_eq!(host.modules, ["ESP32", "ESP32::System", "ESP32::Timer"]);
        assert_eq!(
            host.functions,
            [
                "ESP32::System.delay",
                "ESP32::System.available_memory",
                "ESP32::System.sdk_version",
                "ESP32::System.restart",
                "ESP32::System.deep_sleep_for",
                "ESP32::System.chip_model",
                "ESP32::Timer.get_time",
            ]
        );
    }

    #[test]
    fn test_register_propagates_host_errors() {
        let mut host = RecordingHost {
            capacity: Some(3),
            ..Default::default()
        };
        assert_eq!(register(&mut host, "RP2040"), Err(()));
        assert_eq!(host.functions.len(), 3);
    }

    #[test]
    fn test_finalize_is_noop() {
        let mut host = RecordingHost::default();
        register(&mut host, "RP2040").unwrap();
        finalize(&mut host);
        assert_eq!(host.functions.len(), 7);
    }
}

//! Central registry of discovered commands.

use std::collections::BTreeMap;

use super::command::Command;

/// Maps command names to their handlers.
///
/// Populated during discovery, read-only afterwards. Names are unique;
/// re-registering a name replaces the previous handler, so repeating a
/// discovery pass leaves the registry unchanged. Iteration is in name
/// order, which keeps usage listings stable.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Registers a command under its own name.
    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.insert(command.name().to_string(), command);
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// Returns true if a command with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All registered names, in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(|k| k.as_str())
    }

    /// All registered commands, in name order.
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::runner::command::CommandContext;

    struct MockCommand {
        name: &'static str,
    }

    impl Command for MockCommand {
        fn name(&self) -> &'static str {
            self.name
        }

        fn about(&self) -> &'static str {
            "mock command for testing"
        }

        fn run(&self, _ctx: &CommandContext) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = CommandRegistry::new();
        assert!(registry.is_empty());

        registry.register(Box::new(MockCommand { name: "mock" }));

        assert!(registry.contains("mock"));
        assert!(!registry.contains("missing"));
        let cmd = registry.get("mock").unwrap();
        assert_eq!(cmd.about(), "mock command for testing");
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(MockCommand { name: "sieve" }));
        registry.register(Box::new(MockCommand { name: "fincore" }));
        registry.register(Box::new(MockCommand { name: "uncache" }));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["fincore", "sieve", "uncache"]);
    }

    #[test]
    fn reregistering_a_name_replaces_it() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(MockCommand { name: "mock" }));
        registry.register(Box::new(MockCommand { name: "mock" }));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("mock"));
    }
}

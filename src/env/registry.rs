use std::collections::BTreeMap;
use std::fmt;

use crate::config::EnvConfig;
use crate::env::{DrivingEnv, EnvError, Environment, Observation};

/// Id under which the random driving environment is registered by default.
pub const DRIVING_SIM_ENV_ID: &str = "gymnasium_env/RandomDrivingSim-v0";

pub type BoxedEnv = Box<dyn Environment<Observation = Observation> + Send>;

pub type EnvConstructor = Box<dyn Fn(&EnvConfig) -> Result<BoxedEnv, EnvError> + Send + Sync>;

/// Maps string ids to environment constructors so hosts can build environments by name.
pub struct EnvRegistry {
    constructors: BTreeMap<String, EnvConstructor>,
}

impl EnvRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    pub fn register<C>(&mut self, id: impl Into<String>, constructor: C) -> Result<(), EnvError>
    where
        C: Fn(&EnvConfig) -> Result<BoxedEnv, EnvError> + Send + Sync + 'static,
    {
        let id = id.into();
        if self.constructors.contains_key(&id) {
            return Err(EnvError::DuplicateRegistration(id));
        }
        self.constructors.insert(id, Box::new(constructor));
        Ok(())
    }

    pub fn make(&self, id: &str, config: &EnvConfig) -> Result<BoxedEnv, EnvError> {
        let constructor = self
            .constructors
            .get(id)
            .ok_or_else(|| EnvError::UnknownEnvironment(id.to_string()))?;
        constructor(config)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

impl Default for EnvRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(DRIVING_SIM_ENV_ID, |config: &EnvConfig| {
                Ok(Box::new(DrivingEnv::new(config.clone())?) as BoxedEnv)
            })
            .expect("An empty registry should accept the default environment");
        registry
    }
}

impl fmt::Debug for EnvRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

use autowire::{Carrier, CarrierHost};
use std::{collections::HashMap, str::FromStr, sync::Arc};

use crate::services::HelloService;

/// Request extras the profile page was opened with.
#[derive(Debug, Default)]
pub struct Extras(HashMap<String, String>);

impl Extras {
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.0.insert(key.to_owned(), value.to_owned());
        self
    }

    fn parse<T: FromStr>(&self, key: &str, default: T) -> T {
        self.0.get(key).and_then(|value| value.parse().ok()).unwrap_or(default)
    }
}

impl Carrier for Extras {
    fn get_string(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.parse(key, default)
    }

    fn get_long(&self, key: &str, default: i64) -> i64 {
        self.parse(key, default)
    }

    fn get_float(&self, key: &str, default: f32) -> f32 {
        self.parse(key, default)
    }

    fn get_double(&self, key: &str, default: f64) -> f64 {
        self.parse(key, default)
    }

    fn get_boolean(&self, key: &str, default: bool) -> bool {
        self.parse(key, default)
    }

    fn get_char(&self, key: &str, default: char) -> char {
        self.parse(key, default)
    }

    fn get_byte(&self, key: &str, default: i8) -> i8 {
        self.parse(key, default)
    }

    fn get_short(&self, key: &str, default: i16) -> i16 {
        self.parse(key, default)
    }
}

#[derive(autowire::Autowired, Default)]
pub struct Profile {
    extras: Extras,
    #[autowired]
    pub name: Option<String>,
    #[autowired]
    pub age: i32,
    #[autowired(name = "sex", default = true)]
    pub boy: bool,
    #[autowired(default = 1.5)]
    pub height: f64,
    #[autowired]
    pub hello: Option<Arc<dyn HelloService>>,
    #[autowired(required = true, path = "/service/hello")]
    pub svc: Option<Arc<dyn HelloService>>,
}

impl Profile {
    #[must_use]
    pub fn new(extras: Extras) -> Self {
        Self {
            extras,
            ..Self::default()
        }
    }
}

impl CarrierHost for Profile {
    fn carrier(&self) -> &dyn Carrier {
        &self.extras
    }
}

include!(concat!(env!("OUT_DIR"), "/profile/profile_autowired.rs"));

//! Fixture handlers shared by the unit tests
//!
//! Behaviour is scripted through configuration keys so one handler body
//! covers success, expected failure, `Err` and panic paths:
//! `fail`, `error`, `panic` (`true`, or a list of handler names),
//! `rows` / `rows.<name>` (row count), `table` (count rows from the
//! injected data access), `echo` (copied into the result message).

use crate::data::{DataAccess, Value};
use crate::handler::{
    ConfigSchema, ExecutionResult, FieldSpec, HandlerError, HandlerResult, OutputHandler,
};
use crate::settings::ConfigMap;
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct Scripted {
    pub config: ConfigMap,
    pub data_access: Option<Arc<dyn DataAccess>>,
}

impl Scripted {
    fn scripted_for(&self, key: &str, name: &str) -> bool {
        self.config.get_bool(key) == Some(true) || self.config.get_list(key).iter().any(|n| n == name)
    }

    pub fn run(&mut self, name: &str) -> HandlerResult<ExecutionResult> {
        if self.scripted_for("panic", name) {
            panic!("{} exploded", name);
        }
        if self.scripted_for("error", name) {
            return Err(HandlerError::Execution {
                name: name.to_string(),
                cause: "scripted error".to_string(),
            });
        }
        if self.scripted_for("fail", name) {
            return Ok(ExecutionResult::failure("scripted failure"));
        }

        let rows = match (&self.data_access, self.config.get_string("table")) {
            (Some(data), Some(table)) => {
                let statement = format!("SELECT * FROM {}{}", data.table_prefix(), table);
                data.fetch_all(&statement, &[] as &[Value])?.len() as u64
            }
            _ => self
                .config
                .get_i64(&format!("rows.{}", name))
                .or_else(|| self.config.get_i64("rows"))
                .unwrap_or(1)
                .max(0) as u64,
        };
        let echo = self
            .config
            .get_string("echo")
            .unwrap_or_else(|| "default".to_string());
        Ok(ExecutionResult::success(
            rows,
            vec![format!("{}.csv", name)],
            format!("echo={}", echo),
        ))
    }

    pub fn schema(required_token: bool) -> ConfigSchema {
        let mut schema = ConfigSchema::new();
        let token = FieldSpec::text("API token");
        schema.insert(
            "api_token".to_string(),
            if required_token { token.required() } else { token },
        );
        schema.insert("rows".to_string(), FieldSpec::integer("Rows").default_value(1));
        schema
    }
}

/// Declares a scripted fixture handler type
macro_rules! scripted_handler {
    ($ty:ident, $name:literal, $title:literal, $priority:literal, $category:literal) => {
        scripted_handler!($ty, $name, $title, $priority, $category, false);
    };
    ($ty:ident, $name:literal, $title:literal, $priority:literal, $category:literal, $token:literal) => {
        pub(crate) struct $ty(pub(crate) $crate::test_support::Scripted);

        impl $crate::handler::OutputHandler for $ty {
            fn generate_output(
                &mut self,
            ) -> $crate::handler::HandlerResult<$crate::handler::ExecutionResult> {
                self.0.run($name)
            }

            fn configuration_schema(&self) -> $crate::handler::ConfigSchema {
                $crate::test_support::Scripted::schema($token)
            }

            fn apply_config(
                &mut self,
                config: &$crate::settings::ConfigMap,
            ) -> $crate::handler::HandlerResult<()> {
                self.0.config.merge(config);
                Ok(())
            }

            fn current_config(&self) -> $crate::settings::ConfigMap {
                self.0.config.clone()
            }

            fn set_data_access(
                &mut self,
                data_access: std::sync::Arc<dyn $crate::data::DataAccess>,
            ) {
                self.0.data_access = Some(data_access);
            }
        }

        impl $crate::handler::HandlerType for $ty {
            fn metadata() -> $crate::handler::HandlerMetadata {
                $crate::handler::HandlerMetadata::new($name, $title, concat!($title, " fixture"))
                    .category($category)
                    .priority($priority)
            }

            fn create(
                _ctx: &$crate::handler::HandlerContext,
            ) -> $crate::handler::HandlerResult<Self> {
                Ok(Self($crate::test_support::Scripted::default()))
            }
        }
    };
}

pub(crate) use scripted_handler;

scripted_handler!(AlphaHandler, "alpha", "Alpha", 10, "pos");
scripted_handler!(BetaHandler, "beta", "Beta", 10, "pos");
scripted_handler!(WooHandler, "woo", "Woo", 30, "ecommerce");
scripted_handler!(LabelsHandler, "labels", "Labels", 50, "printing");
scripted_handler!(TokenHandler, "token", "Token", 60, "ecommerce", true);

/// Handler whose constructor always fails
pub(crate) struct BrokenHandler;

impl OutputHandler for BrokenHandler {
    fn generate_output(&mut self) -> HandlerResult<ExecutionResult> {
        Ok(ExecutionResult::failure("unreachable"))
    }

    fn configuration_schema(&self) -> ConfigSchema {
        ConfigSchema::new()
    }

    fn apply_config(&mut self, _config: &ConfigMap) -> HandlerResult<()> {
        Ok(())
    }

    fn current_config(&self) -> ConfigMap {
        ConfigMap::new()
    }
}

impl crate::handler::HandlerType for BrokenHandler {
    fn metadata() -> crate::handler::HandlerMetadata {
        crate::handler::HandlerMetadata::new("broken", "Broken", "Cannot be constructed")
            .priority(70)
    }

    fn create(_ctx: &crate::handler::HandlerContext) -> HandlerResult<Self> {
        Err(HandlerError::Construction {
            name: "broken".to_string(),
            cause: "missing driver".to_string(),
        })
    }
}

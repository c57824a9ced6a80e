//! Cartesian expansion of scan axes into registered step instances.
//!
//! Axes are consumed from the end of the list, so the last discovered axis is
//! the outermost variation in key order. A single working instance is mutated
//! in place while the recursion walks the value tree; it is cloned only when a
//! complete combination is registered.

use serde_json::Value;
use tracing::{debug, trace};

use crate::contract::{combination_count, AxisKind, ScanAxis, StateMap};
use crate::error::{ScanError, ScanResult};
use crate::keys::KeyAllocator;
use crate::registry::ScanRegistry;

const CONFIG_KEY: &str = "config";

pub struct CombinationExpander<'a> {
    step_name: &'a str,
    key_prefix: &'a str,
    keys: &'a mut KeyAllocator,
    registry: &'a mut ScanRegistry,
}

impl<'a> CombinationExpander<'a> {
    pub fn new(
        step_name: &'a str,
        key_prefix: &'a str,
        keys: &'a mut KeyAllocator,
        registry: &'a mut ScanRegistry,
    ) -> Self {
        Self {
            step_name,
            key_prefix,
            keys,
            registry,
        }
    }

    /// Registers one deep copy of `seed` per combination of `axes` and returns how many.
    ///
    /// On error, instances registered for earlier combinations stay in the registry.
    pub fn expand(&mut self, seed: &StateMap, axes: &[ScanAxis]) -> ScanResult<usize> {
        if axes.is_empty() {
            return Err(ScanError::EmptyAxisList);
        }

        debug!(
            step = self.step_name,
            axes = axes.len(),
            combinations = combination_count(axes),
            "expanding parameter scan"
        );

        let mut working = seed.clone();
        let mut registered = 0usize;
        self.combine(&mut working, axes, &mut registered)?;
        Ok(registered)
    }

    fn combine(
        &mut self,
        working: &mut StateMap,
        axes: &[ScanAxis],
        registered: &mut usize,
    ) -> ScanResult<()> {
        let Some((axis, remaining)) = axes.split_last() else {
            return Err(ScanError::EmptyAxisList);
        };

        for value in axis.values() {
            match axis.kind() {
                AxisKind::Config => {
                    write_config(working, self.step_name, axis.path(), value.clone())?
                }
                AxisKind::State => write_state(working, axis.path(), value.clone())?,
            }

            if remaining.is_empty() {
                let key = self.keys.allocate(self.key_prefix);
                trace!(key = %key, "registering scan instance");
                self.registry.insert(key, Value::Object(working.clone()))?;
                *registered += 1;
            } else {
                self.combine(working, remaining, registered)?;
            }
        }

        Ok(())
    }
}

/// Assigns `value` under `<step_name>.config.<path>`. Every level above the last
/// segment must already exist as an object.
pub fn write_config(
    instance: &mut StateMap,
    step_name: &str,
    path: &[String],
    value: Value,
) -> ScanResult<()> {
    let Some((last, intermediate)) = path.split_last() else {
        return Err(ScanError::EmptyAxisPath);
    };

    let mut cursor = instance;
    let root = [step_name, CONFIG_KEY];
    for segment in root
        .into_iter()
        .chain(intermediate.iter().map(String::as_str))
    {
        cursor = match cursor.get_mut(segment) {
            Some(Value::Object(nested)) => nested,
            Some(_) => {
                return Err(ScanError::PathConflict {
                    kind: AxisKind::Config,
                    path: path.to_vec(),
                    segment: segment.to_string(),
                });
            }
            None => {
                return Err(ScanError::MissingConfigPath {
                    step: step_name.to_string(),
                    path: path.to_vec(),
                    segment: segment.to_string(),
                });
            }
        };
    }

    cursor.insert(last.clone(), value);
    Ok(())
}

/// Assigns `value` at `path` from the top level of the instance, creating empty
/// objects for missing intermediate segments.
pub fn write_state(instance: &mut StateMap, path: &[String], value: Value) -> ScanResult<()> {
    let Some((last, intermediate)) = path.split_last() else {
        return Err(ScanError::EmptyAxisPath);
    };

    let mut cursor = instance;
    for segment in intermediate {
        let entry = cursor
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(StateMap::new()));
        cursor = match entry {
            Value::Object(nested) => nested,
            _ => {
                return Err(ScanError::PathConflict {
                    kind: AxisKind::State,
                    path: path.to_vec(),
                    segment: segment.clone(),
                });
            }
        };
    }

    cursor.insert(last.clone(), value);
    Ok(())
}

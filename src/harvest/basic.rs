//! Harvester for file names that encode alternates and display types.
//!
//! File name conventions:
//!
//! | File (under `Views`)        | Shape type               | Display type |
//! |-----------------------------|--------------------------|--------------|
//! | `Post.html`                 | `Post`                   | -            |
//! | `Post-Featured.html`        | `Post__Featured`         | -            |
//! | `Post.Summary.hbs`          | `Post_Summary`           | `Summary`    |
//! | `Post-Featured.Summary.hbs` | `Post_Summary__Featured` | `Summary`    |
//!
//! Files under `Views/<Kind>` (other than `Views/Items`) get a `<Kind>_`
//! prefix, so `Views/Parts/Body.hbs` harvests as `Parts_Body`.

use crate::error::Result;

use super::{HarvestInfo, ShapeHit, TemplateHarvester};

/// Harvester for `Views`, `Views/Items`, `Views/Parts` and `Views/Fields`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicHarvester;

impl BasicHarvester {
    /// Configuration name.
    pub const NAME: &'static str = "basic";
}

impl TemplateHarvester for BasicHarvester {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn sub_paths(&self) -> Vec<String> {
        ["Views", "Views/Items", "Views/Parts", "Views/Fields"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn harvest_shape(&self, info: &HarvestInfo) -> Result<Vec<ShapeHit>> {
        let name = info.file_name.as_str();
        let last_dash = name.rfind('-');
        let last_dot = name.rfind('.');

        let hit = match last_dot {
            Some(dot) if dot > 0 && last_dash.is_none_or(|dash| dot > dash) => {
                let display_type = &name[dot + 1..];
                let shape_type = adjust(&info.sub_path, &name[..dot], Some(display_type));
                if display_type.is_empty() {
                    ShapeHit::new(shape_type)
                } else {
                    ShapeHit::new(shape_type).with_display_type(display_type)
                }
            }
            _ => ShapeHit::new(adjust(&info.sub_path, name, None)),
        };

        Ok(vec![hit])
    }
}

/// Canonical shape type names use `__` for alternates and `_` elsewhere.
fn adjust(sub_path: &str, file_name: &str, display_type: Option<&str>) -> String {
    let leader = match sub_path.strip_prefix("Views/") {
        Some(tail) if sub_path != "Views/Items" && !tail.is_empty() => {
            format!("{}_", tail.replace('/', "_"))
        }
        _ => String::new(),
    };

    let shape_type = format!(
        "{}{}",
        leader,
        file_name
            .replace("--", "__")
            .replace('-', "__")
            .replace('.', "_")
    );

    match display_type {
        None | Some("") => shape_type,
        Some(display_type) => match shape_type.find("__") {
            Some(separator) if separator > 0 => format!(
                "{}_{}{}",
                &shape_type[..separator],
                display_type,
                &shape_type[separator..]
            ),
            _ => format!("{}_{}", shape_type, display_type),
        },
    }
}

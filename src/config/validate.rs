//! Structural validation of the descriptor
//!
//! The host trusts whatever it is handed, so mistakes like two bindings on
//! one key or a match rule that matches everything only surface as confusing
//! runtime behavior. `validate` catches them ahead of time and reports them
//! as findings; the CLI turns a non-empty list into a failing exit code.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::color::HexColor;
use crate::config::bar::{Widget, render_clock_sample};
use crate::config::binding::KeySpec;
use crate::config::descriptor::Config;

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub message: String,
}

impl Finding {
    fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Check the descriptor's structural invariants, returning all problems found
pub fn validate(config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    check_binding_collisions(config, &mut findings);
    check_match_predicates(config, &mut findings);
    check_groups(config, &mut findings);
    check_group_references(config, &mut findings);
    check_colors(config, &mut findings);
    check_widgets(config, &mut findings);

    findings
}

/// No two bindings may share a (modifier set, key) pair within one scope.
/// The top-level scope covers declared keys, generated group bindings, and
/// chord prefixes; each chord is its own scope; mouse buttons are another.
fn check_binding_collisions(config: &Config, findings: &mut Vec<Finding>) {
    let mut top_level: Vec<KeySpec> = config.effective_keys().iter().map(|b| b.keys).collect();
    top_level.extend(config.chords.iter().map(|c| c.prefix));
    report_duplicates(&top_level, "key binding", findings);

    for chord in &config.chords {
        let specs: Vec<KeySpec> = chord.bindings.iter().map(|b| b.keys).collect();
        report_duplicates(&specs, &format!("chord '{}' binding", chord.name), findings);
    }

    let buttons: Vec<KeySpec> = config.mouse.iter().map(|b| b.keys).collect();
    report_duplicates(&buttons, "mouse binding", findings);
}

fn report_duplicates(specs: &[KeySpec], what: &str, findings: &mut Vec<Finding>) {
    let mut counts: HashMap<KeySpec, usize> = HashMap::new();
    for spec in specs {
        *counts.entry(*spec).or_default() += 1;
    }

    let mut duplicates: Vec<_> = counts.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort_by_key(|(spec, _)| spec.key_code);
    for (spec, count) in duplicates {
        findings.push(Finding::new(format!(
            "{} {} declared {} times",
            what,
            spec.display_name(),
            count
        )));
    }
}

/// Every group match and floating rule must constrain at least one field
fn check_match_predicates(config: &Config, findings: &mut Vec<Finding>) {
    for group in &config.groups {
        for (i, rule) in group.matches.iter().enumerate() {
            if !rule.is_constrained() {
                findings.push(Finding::new(format!(
                    "group '{}' match rule #{} has no match fields",
                    group.name, i
                )));
            }
        }
    }

    for (i, rule) in config.floating.rules.iter().enumerate() {
        if !rule.is_constrained() {
            findings.push(Finding::new(format!(
                "floating rule #{} has no match fields",
                i
            )));
        }
    }
}

fn check_groups(config: &Config, findings: &mut Vec<Finding>) {
    let mut seen = HashSet::new();
    let layout_names: HashSet<&str> = config.layouts.iter().map(|l| l.name()).collect();

    for group in &config.groups {
        if !seen.insert(group.name.as_str()) {
            findings.push(Finding::new(format!(
                "group '{}' declared more than once",
                group.name
            )));
        }

        if group.digit_key().is_none() {
            findings.push(Finding::new(format!(
                "group '{}' has no digit name, no switch/move bindings generated",
                group.name
            )));
        }

        if let Some(layout) = &group.default_layout
            && !layout_names.contains(layout.as_str())
        {
            findings.push(Finding::new(format!(
                "group '{}' default layout '{}' is not in the layout list",
                group.name, layout
            )));
        }
    }
}

/// Actions referencing groups by name must name a declared group
fn check_group_references(config: &Config, findings: &mut Vec<Finding>) {
    let group_names: HashSet<&str> = config.groups.iter().map(|g| g.name.as_str()).collect();
    let mut check = |name: Option<&str>, where_: &str| {
        if let Some(name) = name
            && !group_names.contains(name)
        {
            findings.push(Finding::new(format!(
                "{} references unknown group '{}'",
                where_, name
            )));
        }
    };

    for binding in &config.keys {
        check(
            binding.action.group_ref(),
            &format!("binding {}", binding.keys.display_name()),
        );
    }
    for chord in &config.chords {
        for binding in &chord.bindings {
            check(
                binding.action.group_ref(),
                &format!("chord '{}' binding {}", chord.name, binding.keys.display_name()),
            );
        }
    }
}

/// Every declared color string must parse as hex
fn check_colors(config: &Config, findings: &mut Vec<Finding>) {
    let mut check = |color: &str, where_: &str| {
        if HexColor::parse(color).is_none() {
            findings.push(Finding::new(format!(
                "{} color '{}' is not a valid hex color",
                where_, color
            )));
        }
    };

    for (i, layout) in config.layouts.iter().enumerate() {
        for color in layout.colors() {
            check(color, &format!("layout #{} ({})", i, layout.name()));
        }
    }

    for (i, screen) in config.screens.iter().enumerate() {
        for color in screen.bar.colors() {
            check(color, &format!("screen #{} bar", i));
        }
    }

    check(&config.floating.border_focus, "floating layout");
    check(&config.floating.border_normal, "floating layout");
}

fn check_widgets(config: &Config, findings: &mut Vec<Finding>) {
    for (i, screen) in config.screens.iter().enumerate() {
        for widget in &screen.bar.widgets {
            match widget {
                Widget::Clock { format } => {
                    if render_clock_sample(format).is_err() {
                        findings.push(Finding::new(format!(
                            "screen #{} clock format '{}' does not render",
                            i, format
                        )));
                    }
                }
                Widget::Spacer { length } if *length == 0 => {
                    findings.push(Finding::new(format!(
                        "screen #{} spacer has zero length",
                        i
                    )));
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::action::Action;
    use crate::config::binding::{KeyBinding, KeySpec};
    use crate::config::group::{Group, WindowMatch};
    use evdev::KeyCode;

    #[test]
    fn test_default_config_is_clean() {
        let findings = validate(&Config::default());
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_duplicate_top_level_binding() {
        let mut config = Config::default();
        config.keys.push(KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_W),
            Action::NextLayout,
            "",
        ));

        let findings = validate(&config);
        assert!(
            findings
                .iter()
                .any(|f| f.message.contains("Super+W") && f.message.contains("2 times"))
        );
    }

    #[test]
    fn test_generated_group_binding_collides_with_declared_key() {
        let mut config = Config::default();
        // Super+1 is owned by the generated switch-to-group binding
        config.keys.push(KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_1),
            Action::NextLayout,
            "",
        ));

        let findings = validate(&config);
        assert!(findings.iter().any(|f| f.message.contains("Super+1")));
    }

    #[test]
    fn test_chord_scope_is_distinct_from_top_level() {
        let mut config = Config::default();
        // Same mods+key as the top-level kill binding, but inside a chord
        config.chords[0].bindings.push(KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_W),
            Action::KillWindow,
            "",
        ));

        let findings = validate(&config);
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_duplicate_inside_chord() {
        let mut config = Config::default();
        let dup = config.chords[0].bindings[0].clone();
        config.chords[0].bindings.push(dup);

        let findings = validate(&config);
        assert!(findings.iter().any(|f| f.message.contains("chord 'launch'")));
    }

    #[test]
    fn test_chord_prefix_collision_with_key() {
        let mut config = Config::default();
        config.keys.push(KeyBinding::new(
            config.chords[0].prefix,
            Action::NextLayout,
            "",
        ));

        let findings = validate(&config);
        assert!(findings.iter().any(|f| f.message.contains("Super+P")));
    }

    #[test]
    fn test_unconstrained_floating_rule() {
        let mut config = Config::default();
        config.floating.rules.push(WindowMatch::default());

        let findings = validate(&config);
        assert!(
            findings
                .iter()
                .any(|f| f.message.contains("floating rule") && f.message.contains("no match"))
        );
    }

    #[test]
    fn test_unconstrained_group_match() {
        let mut config = Config::default();
        config.groups[0].matches.push(WindowMatch {
            class: Some(String::new()),
            ..Default::default()
        });

        let findings = validate(&config);
        assert!(findings.iter().any(|f| f.message.contains("group '1'")));
    }

    #[test]
    fn test_duplicate_group_name() {
        let mut config = Config::default();
        config.groups.push(Group::new("1", "again"));

        let findings = validate(&config);
        assert!(
            findings
                .iter()
                .any(|f| f.message.contains("declared more than once"))
        );
        // The duplicated digit key also collides in the generated bindings
        assert!(findings.iter().any(|f| f.message.contains("Super+1")));
    }

    #[test]
    fn test_non_digit_group_name() {
        let mut config = Config::default();
        config.groups.push(Group::new("scratch", "scratch"));

        let findings = validate(&config);
        assert!(findings.iter().any(|f| f.message.contains("no digit name")));
    }

    #[test]
    fn test_unknown_default_layout() {
        let mut config = Config::default();
        config.groups[0].default_layout = Some("spiral".to_string());

        let findings = validate(&config);
        assert!(findings.iter().any(|f| f.message.contains("spiral")));
    }

    #[test]
    fn test_unknown_group_reference() {
        let mut config = Config::default();
        config.keys.push(KeyBinding::new(
            KeySpec::sup(KeyCode::KEY_G),
            Action::SwitchGroup {
                name: "nope".to_string(),
            },
            "",
        ));

        let findings = validate(&config);
        assert!(
            findings
                .iter()
                .any(|f| f.message.contains("unknown group 'nope'"))
        );
    }

    #[test]
    fn test_bad_bar_color() {
        let mut config = Config::default();
        config.screens[0].bar.background = "not-a-color".to_string();

        let findings = validate(&config);
        assert!(findings.iter().any(|f| f.message.contains("not-a-color")));
    }

    #[test]
    fn test_bad_clock_format() {
        let mut config = Config::default();
        for widget in &mut config.screens[0].bar.widgets {
            if let Widget::Clock { format } = widget {
                *format = "%Q".to_string();
            }
        }

        let findings = validate(&config);
        assert!(findings.iter().any(|f| f.message.contains("clock format")));
    }

    #[test]
    fn test_duplicate_mouse_binding() {
        let mut config = Config::default();
        let dup = config.mouse[0].clone();
        config.mouse.push(dup);

        let findings = validate(&config);
        assert!(findings.iter().any(|f| f.message.contains("mouse binding")));
    }
}

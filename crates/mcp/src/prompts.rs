// Canned prompt templates. Static text, nothing computed.

use crate::protocol::{GetPromptResult, PromptMessage, PromptSchema};

struct PromptDef {
    name: &'static str,
    description: &'static str,
    text: &'static str,
}

const PROMPTS: [PromptDef; 3] = [
    PromptDef {
        name: "volume-control-help",
        description: "Usage guide for the volume control tools",
        text: HELP_TEXT,
    },
    PromptDef {
        name: "volume-settings",
        description: "Template for configuring volume preferences",
        text: SETTINGS_TEXT,
    },
    PromptDef {
        name: "volume-troubleshooting",
        description: "Troubleshooting guide for volume control issues",
        text: TROUBLESHOOTING_TEXT,
    },
];

const HELP_TEXT: &str = "\
# Volume Control Help

## Available commands
1. get_volume: check current volume level and mute status
2. set_volume: set volume to a specific percentage (0-100)
3. mute: mute the system audio
4. unmute: unmute the system audio
5. toggle_mute: toggle between muted and unmuted
6. apply_preset: use a predefined volume setting

## Presets
- MUTED: 0% volume, muted
- LOW: 25% volume, unmuted
- MEDIUM: 50% volume, unmuted
- HIGH: 75% volume, unmuted
- MAX: 100% volume, unmuted

## Examples
- \"Set volume to 50\"
- \"Apply preset MEDIUM\"
- \"Toggle mute\"";

const SETTINGS_TEXT: &str = "\
# Volume Settings

Please specify your volume preferences:

1. Target volume level: percentage from 0 to 100
2. Mute preference: muted or unmuted
3. Or pick a preset: MUTED, LOW, MEDIUM, HIGH, MAX

## Quick suggestions
- Quiet environment: LOW or MEDIUM
- Presentations: HIGH
- Privacy: MUTED";

const TROUBLESHOOTING_TEXT: &str = "\
# Volume Control Troubleshooting

## Common issues
1. Volume not changing: check that audio drivers are working
2. Mute not working: verify system audio permissions
3. Preset not applying: preset names are matched case-insensitively
   against MUTED, LOW, MEDIUM, HIGH, MAX

## Requirements
- Windows with a default audio render endpoint
- Audio drivers installed

## Diagnostic steps
1. Run get_volume to check the current status
2. Try set_volume with 50
3. Test mute and unmute";

pub struct PromptRegistry;

impl PromptRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn list_schemas(&self) -> Vec<PromptSchema> {
        PROMPTS
            .iter()
            .map(|p| PromptSchema {
                name: p.name.to_string(),
                description: p.description.to_string(),
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<GetPromptResult> {
        PROMPTS.iter().find(|p| p.name == name).map(|p| GetPromptResult {
            description: p.description.to_string(),
            messages: vec![PromptMessage::user(p.text)],
        })
    }

    pub fn len(&self) -> usize {
        PROMPTS.len()
    }

    pub fn is_empty(&self) -> bool {
        PROMPTS.is_empty()
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_three_prompts() {
        let registry = PromptRegistry::new();
        let names: Vec<String> = registry.list_schemas().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "volume-control-help",
                "volume-settings",
                "volume-troubleshooting"
            ]
        );
    }

    #[test]
    fn test_get_known_prompt() {
        let registry = PromptRegistry::new();
        let prompt = registry.get("volume-control-help").unwrap();
        assert_eq!(prompt.messages.len(), 1);
        let crate::protocol::Content::Text { text } = &prompt.messages[0].content;
        assert!(text.contains("apply_preset"));
    }

    #[test]
    fn test_get_unknown_prompt() {
        assert!(PromptRegistry::new().get("volume-eq").is_none());
    }
}

//! Static descriptor the orchestrator reads to list this plugin and render
//! its option form. This is data, not logic: defaults here must agree with
//! [`crate::config::EncodingConfig::default`].

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PluginDetails {
    pub id: &'static str,
    #[serde(rename = "Stage")]
    pub stage: &'static str,
    #[serde(rename = "Name")]
    pub name: &'static str,
    #[serde(rename = "Type")]
    pub media_type: &'static str,
    #[serde(rename = "Operation")]
    pub operation: &'static str,
    #[serde(rename = "Description")]
    pub description: &'static str,
    #[serde(rename = "Version")]
    pub version: &'static str,
    #[serde(rename = "Tags")]
    pub tags: &'static str,
    #[serde(rename = "Inputs")]
    pub inputs: &'static [PluginInput],
}

/// One configurable option. Toggles carry a typed default and a dropdown;
/// free-form options only carry their tooltip.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInput {
    pub name: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<bool>,
    #[serde(rename = "inputUI", skip_serializing_if = "Option::is_none")]
    pub input_ui: Option<InputUi>,
    pub tooltip: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InputUi {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub options: &'static [&'static str],
}

const BOOL_DROPDOWN: InputUi = InputUi {
    kind: "dropdown",
    options: &["false", "true"],
};

impl PluginInput {
    const fn text(name: &'static str, tooltip: &'static str) -> Self {
        Self {
            name,
            type_hint: None,
            default_value: None,
            input_ui: None,
            tooltip,
        }
    }

    const fn toggle(name: &'static str, default: bool, tooltip: &'static str) -> Self {
        Self {
            name,
            type_hint: Some("boolean"),
            default_value: Some(default),
            input_ui: Some(BOOL_DROPDOWN),
            tooltip,
        }
    }

    /// The default named at the end of the tooltip.
    pub fn documented_default(&self) -> &'static str {
        self.tooltip.rsplit('\n').next().unwrap_or_default().trim()
    }
}

pub const PLUGIN_INPUTS: &[PluginInput] = &[
    PluginInput::text(
        "max_video_width",
        "\\nMaximum video width that will be used as based for encoding.\\n\n\
                  \\nValue:\\n\n1920\\n\n2160\\n\n\\nDefault:\\n\n1920",
    ),
    PluginInput::toggle(
        "auto_crop",
        false,
        "\\nEnter value whether Handbrake need to auto crop the black bar or not.\\n\n\
                  \\nValue:\\n\ntrue\\n\nfalse\\n\n\\nDefault:\\n\nfalse",
    ),
    PluginInput::toggle(
        "use_crf",
        true,
        "\\nWhether to encode using CRF or VBR (with 2-pass).\\n\n\
                  \\nValue:\\n\ntrue\\n\nfalse\\n\n\\nDefault:\\n\ntrue",
    ),
    PluginInput::text(
        "crf_quality",
        "\\nSet video quality (float value).\\n\n\
                  \\nValue:\\n\n23.0\\n\n25.5\\n\n\\nDefault:\\n\n23.0",
    ),
    PluginInput::text(
        "video_bitrate",
        "\\nSet video birate (>= 1000).\\n\n\
                  \\nValue:\\n\n2500\\n\n3000\\n\n\\nDefault:\\n\n2500",
    ),
    PluginInput::text(
        "audio_bitrate",
        "\\nSet audio birate (32 - 512).\\n\n\
                  \\nValue:\\n\n32\\n\n160\\n\n\\nDefault:\\n\n160",
    ),
    PluginInput::toggle(
        "extract_subs",
        true,
        "\\nExtract subtitle if exists.\\n\n\
                  \\nValue:\\n\ntrue\\n\nfalse\\n\n\\nDefault:\\n\ntrue",
    ),
    PluginInput::text(
        "encoder_preset",
        "\\nAdjust video encoding settings for a particular speed/efficiency tradeoff (encoder-specific).\\n\n\
                  \\nValue:\\n\nultrafast\\n\nsuperfast\\n\nveryfast\\n\nfaster\\n\nfast\\n\nmedium\\n\n\
                  slow\\n\nslower\\n\nveryslow\\n\nplacebo\\n\n\\nDefault:\\n\nmedium",
    ),
    PluginInput::text(
        "encoder_tune",
        "\\nAdjust video encoding settings for a particular type of source or situation (encoder-specific).\\n\n\
                  \\nValue:\\n\nfilm\\n\nanimation\\n\ngrain\\n\nstillimage\\n\npsnr\\n\nssim\\n\n\
                  fastdecode\\n\nzerolatency\\n\n\\nDefault:\\n\nfilm",
    ),
    PluginInput::text(
        "encoder_level",
        "\\nEnsures compliance with the requested codec level (encoder-specific).\\n\n\
                  \\nValue:\\n\nauto\\n\n1.0\\n\n1b\\n\n1.1\\n\n1.2\\n\n1.3\\n\n2.0\\n\n2.1\\n\n2.2\\n\n\
                  3.0\\n\n3.1\\n\n3.2\\n\n4.0\\n\n4.1\\n\n4.2\\n\n5.0\\n\n5.1\\n\n5.2\\n\n\
                  \\nDefault:\\n\n4.2",
    ),
    PluginInput::text(
        "encoder_profile",
        "\\nEnsures compliance with the requested codec profile (encoder-specific).\\n\n\
                  \\nValue:\\n\nauto\\n\nhigh\\n\nmain\\n\nbaseline\\n\n\\nDefault:\\n\nhigh",
    ),
    // Declared `true` for the option form; an absent value still means off,
    // as the tooltip documents.
    PluginInput::toggle(
        "is_debug",
        true,
        "\\nTo pass the parameter to the console log or not?\\n\n\
                  \\nValue:\\n\ntrue\\n\nfalse\\n\n\\nDefault:\\n\nfalse",
    ),
];

pub static PLUGIN_DETAILS: PluginDetails = PluginDetails {
    id: "BillyInferno_Handbrake_Encoding",
    stage: "Pre-processing",
    name: "Configurable Handbrake Video Encoding",
    media_type: "Video",
    operation: "Transcode",
    description: "Configurable video encoding with lot of options using Handbrake",
    version: "2.00",
    tags: "pre-processing,handbrake,ffmpeg,configurable",
    inputs: PLUGIN_INPUTS,
};

pub fn plugin_details() -> &'static PluginDetails {
    &PLUGIN_DETAILS
}

//! Creative Commons licenses offered for uploaded media

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageLicense {
    #[serde(rename = "CC0")]
    Cc0,
    #[serde(rename = "CC BY")]
    CcBy,
    #[serde(rename = "CC BY-SA")]
    CcBySa,
    #[serde(rename = "CC BY-NC")]
    CcByNc,
    #[serde(rename = "CC BY-NC-SA")]
    CcByNcSa,
}

impl ImageLicense {
    pub fn all() -> [ImageLicense; 5] {
        [
            ImageLicense::Cc0,
            ImageLicense::CcBy,
            ImageLicense::CcBySa,
            ImageLicense::CcByNc,
            ImageLicense::CcByNcSa,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageLicense::Cc0 => "CC0",
            ImageLicense::CcBy => "CC BY",
            ImageLicense::CcBySa => "CC BY-SA",
            ImageLicense::CcByNc => "CC BY-NC",
            ImageLicense::CcByNcSa => "CC BY-NC-SA",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ImageLicense::Cc0 => "Public Domain",
            ImageLicense::CcBy => "Attribution",
            ImageLicense::CcBySa => "Attribution-ShareAlike",
            ImageLicense::CcByNc => "Attribution-Non-Commercial",
            ImageLicense::CcByNcSa => "Attribution-NonCommercial-ShareAlike",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            ImageLicense::Cc0 => "http://creativecommons.org/publicdomain/zero/1.0/",
            ImageLicense::CcBy => "http://creativecommons.org/licenses/by/3.0/",
            ImageLicense::CcBySa => "http://creativecommons.org/licenses/by-sa/3.0/",
            ImageLicense::CcByNc => "http://creativecommons.org/licenses/by-nc/3.0/",
            ImageLicense::CcByNcSa => "http://creativecommons.org/licenses/by-nc-sa/3.0/",
        }
    }

    /// Sentence shown before an upload starts
    pub fn notice(&self) -> String {
        format!(
            "The images will be uploaded under the terms of the {} {} license (see {}).",
            self.name(),
            self.description(),
            self.url()
        )
    }
}

impl fmt::Display for ImageLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImageLicense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace(['_', ' '], "-");
        ImageLicense::all()
            .into_iter()
            .find(|l| l.name().replace(' ', "-") == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = ImageLicense::all().iter().map(|l| l.name()).collect();
                format!("Unknown license '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

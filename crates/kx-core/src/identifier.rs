use std::path::{Component, Path, PathBuf};

use crate::error::{KxError, KxResult};

/// Position of a model below the Models folder, as ordered path segments.
///
/// The last segment is the model name (file stem for parts, folder name for
/// assembly units); the others are the enclosing folder names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    segments: Vec<String>,
}

impl Identifier {
    /// Parse a separator-joined identifier such as `Klyax/Arm/Gripper`.
    pub fn parse(text: &str, separator: char) -> KxResult<Self> {
        let invalid = |reason: &str| KxError::InvalidIdentifier {
            identifier: text.to_string(),
            reason: reason.to_string(),
        };

        if text.is_empty() {
            return Err(invalid("identifier is empty"));
        }

        let mut segments = Vec::new();
        for segment in text.split(separator) {
            if segment.is_empty() {
                return Err(invalid("empty segment"));
            }
            if segment == "." || segment == ".." {
                return Err(invalid("relative segments are not allowed"));
            }
            if segment.contains(['/', std::path::MAIN_SEPARATOR]) {
                return Err(invalid("segment contains a path separator"));
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// Derive the identifier of the model at `path` (relative to the Models
    /// folder) whose name is `name`.
    pub fn from_relative_path(path: &Path, name: &str, separator: char) -> KxResult<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
                _ => return Err(KxError::OutsideModelsRoot(path.to_path_buf())),
            }
        }

        match segments.last_mut() {
            Some(last) => *last = name.to_string(),
            None => return Err(KxError::OutsideModelsRoot(path.to_path_buf())),
        }

        if let Some(bad) = segments.iter().find(|s| s.contains(separator)) {
            return Err(KxError::ReservedSeparator {
                name: bad.clone(),
                separator,
            });
        }

        Ok(Self { segments })
    }

    /// The model name (last segment).
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Join the segments with `separator`.
    pub fn render(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(segment);
        }
        out
    }

    /// Path of the model relative to the Models folder, without extension.
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_splits_on_separator() {
        let id = Identifier::parse("Klyax/Arm/Gripper", '/').unwrap();
        assert_eq!(id.segments, ["Klyax", "Arm", "Gripper"]);
        assert_eq!(id.name(), "Gripper");
        assert_eq!(id.to_relative_path(), PathBuf::from("Klyax/Arm/Gripper"));
    }

    #[test]
    fn parse_with_custom_separator() {
        let id = Identifier::parse("Klyax:Frame-Base", ':').unwrap();
        assert_eq!(id.segments, ["Klyax", "Frame-Base"]);
        assert_eq!(id.render(':'), "Klyax:Frame-Base");
    }

    #[test]
    fn parse_rejects_malformed() {
        for text in ["", "Klyax//Arm", "/Klyax", "Klyax/", "Klyax/../Other", "./Klyax"] {
            let err = Identifier::parse(text, '/').unwrap_err();
            assert!(
                matches!(err, KxError::InvalidIdentifier { .. }),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_embedded_path_separator() {
        let err = Identifier::parse("Klyax:Arm/Gripper", ':').unwrap_err();
        assert!(matches!(err, KxError::InvalidIdentifier { .. }));
    }

    #[test]
    fn part_path_uses_stem() {
        let id =
            Identifier::from_relative_path(Path::new("Klyax/Arm/Gripper.m3d"), "Gripper", '/')
                .unwrap();
        assert_eq!(id.render('/'), "Klyax/Arm/Gripper");
    }

    #[test]
    fn assembly_path_uses_folder_name() {
        let id = Identifier::from_relative_path(Path::new("Klyax/Frame.Base"), "Frame.Base", '/')
            .unwrap();
        assert_eq!(id.render('/'), "Klyax/Frame.Base");
    }

    #[test]
    fn empty_or_escaping_path_is_outside_root() {
        let err = Identifier::from_relative_path(Path::new(""), "x", '/').unwrap_err();
        assert!(matches!(err, KxError::OutsideModelsRoot(_)));

        let err = Identifier::from_relative_path(Path::new("../x.m3d"), "x", '/').unwrap_err();
        assert!(matches!(err, KxError::OutsideModelsRoot(_)));
    }

    #[test]
    fn name_with_separator_is_rejected() {
        let err =
            Identifier::from_relative_path(Path::new("Klyax/Arm.v2.m3d"), "Arm.v2", '.').unwrap_err();
        assert!(matches!(
            err,
            KxError::ReservedSeparator { separator: '.', .. }
        ));
    }

    proptest! {
        #[test]
        fn render_then_parse_is_identity(
            segments in prop::collection::vec("[A-Za-z0-9_][A-Za-z0-9_ -]{0,7}", 1..6)
        ) {
            let id = Identifier { segments };
            let parsed = Identifier::parse(&id.render('/'), '/').unwrap();
            prop_assert_eq!(parsed, id);
        }

        #[test]
        fn relative_path_round_trips(
            segments in prop::collection::vec("[A-Za-z0-9_][A-Za-z0-9_-]{0,7}", 1..6)
        ) {
            let id = Identifier { segments };
            let path = id.to_relative_path();
            let derived = Identifier::from_relative_path(&path, id.name(), '/').unwrap();
            prop_assert_eq!(derived, id);
        }
    }
}

//! Tests for invocation modes and their buffer manifests

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use wangtiles::engine::mode::{BufferKind, Mode};
    use wangtiles::io::buffer::ChannelLayout;

    // Tests each mode declares the buffers it exchanges
    // Verified by dropping the constraint map from the manifest
    #[test]
    fn test_manifests() {
        let full = Mode::TilesCornersConstraints.manifest();
        assert_eq!(full.inputs, &[BufferKind::Texture]);
        assert_eq!(
            full.outputs,
            &[
                BufferKind::TileSet,
                BufferKind::CornerPackRgba,
                BufferKind::ConstraintMap
            ]
        );
        assert_eq!(full.buffer_count(), 4);

        assert_eq!(
            Mode::TilesCorners.manifest().outputs,
            &[BufferKind::TileSet, BufferKind::CornerPackRgb]
        );
        assert_eq!(Mode::LegacyTiles.manifest(), Mode::Tiles.manifest());
        assert!(Mode::Index.manifest().inputs.is_empty());
        assert_eq!(Mode::Palette.manifest().outputs, &[BufferKind::PaletteMap]);
    }

    // Tests modes sharing a flag are told apart by buffer count
    // Verified by resolving on the flag alone
    #[test]
    fn test_resolve() {
        assert_eq!(Mode::resolve(None, 2), Some(Mode::LegacyTiles));
        assert_eq!(Mode::resolve(Some("--tiles"), 2), Some(Mode::Tiles));
        assert_eq!(Mode::resolve(Some("--tiles"), 3), Some(Mode::TilesCorners));
        assert_eq!(
            Mode::resolve(Some("--tiles"), 4),
            Some(Mode::TilesCornersConstraints)
        );
        assert_eq!(Mode::resolve(Some("--index"), 1), Some(Mode::Index));
        assert_eq!(Mode::resolve(Some("--palette"), 1), Some(Mode::Palette));
        assert_eq!(Mode::resolve(Some("--tiles"), 5), None);
        assert_eq!(Mode::resolve(None, 3), None);
        assert_eq!(Mode::resolve(Some("--unknown"), 1), None);
    }

    // Tests every mode resolves back to itself from its own flag and manifest
    // Verified by giving two modes the same flag and count
    #[test]
    fn test_resolution_is_unambiguous() {
        for mode in Mode::ALL {
            assert_eq!(
                Mode::resolve(mode.flag(), mode.manifest().buffer_count()),
                Some(mode)
            );
        }
    }

    // Tests only the constraint mode accepts a debug tile
    // Verified by allowing debug tiles in every tile mode
    #[test]
    fn test_debug_tile_support() {
        let supported: Vec<Mode> = Mode::ALL
            .into_iter()
            .filter(|mode| mode.supports_debug_tile())
            .collect();

        assert_eq!(supported, vec![Mode::TilesCornersConstraints]);
        assert!(Mode::Tiles.requires_texture());
        assert!(!Mode::Palette.requires_texture());
    }

    // Tests buffer layouts and which buffers have an inferred side
    // Verified by marking the RGB corner pack as RGBA
    #[test]
    fn test_buffer_kinds() {
        assert_eq!(BufferKind::CornerPackRgba.layout(), ChannelLayout::Rgba);
        assert_eq!(BufferKind::CornerPackRgb.layout(), ChannelLayout::Rgb);
        assert_eq!(BufferKind::ConstraintMap.layout(), ChannelLayout::Rgb);
        assert!(!BufferKind::ConstraintMap.has_resolution_side());
        assert!(BufferKind::TileSet.has_resolution_side());
    }

    // Tests staged file names never collide within a mode
    // Verified by giving tiles and corners the same stem
    #[test]
    fn test_file_stems_unique_per_mode() {
        for mode in Mode::ALL {
            let manifest = mode.manifest();
            let stems: HashSet<&str> = manifest
                .inputs
                .iter()
                .chain(manifest.outputs)
                .map(|kind| kind.file_stem())
                .collect();
            assert_eq!(stems.len(), manifest.buffer_count(), "{mode}");
        }
    }

    // Tests display names and flags
    // Verified by printing the debug representation
    #[test]
    fn test_names_and_flags() {
        assert_eq!(Mode::TilesCorners.to_string(), "tiles+corners");
        assert_eq!(Mode::LegacyTiles.flag(), None);
        assert_eq!(Mode::Index.flag(), Some("--index"));
        assert_eq!(Mode::TilesCornersConstraints.flag(), Some("--tiles"));
    }
}

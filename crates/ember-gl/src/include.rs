// Copyright 2025 Ember Engine Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resolves `#include "file"` directives in GLSL source.
//!
//! GLSL has no include mechanism of its own, so sources are expanded before
//! compilation. Included files resolve relative to the including file's
//! directory and may themselves include further files, up to a fixed depth
//! that turns cycles into errors instead of infinite recursion.

use std::path::Path;

use ember_core::rhi::error::ShaderError;
use ember_core::rhi::pipeline::ShaderSourceData;

/// Deepest chain of nested includes before expansion is abandoned.
const MAX_INCLUDE_DEPTH: u32 = 8;

/// Loads and fully expands a shader source, whatever form it arrives in.
///
/// Inline sources have no directory to resolve includes against, so an
/// include directive inside one is an error.
pub(crate) fn resolve_source(source: &ShaderSourceData<'_>) -> Result<String, ShaderError> {
    match source {
        ShaderSourceData::Glsl(text) => expand_includes(text, None, "<inline>"),
        ShaderSourceData::GlslFile(path) => {
            let text = read_shader_source(path)?;
            expand_includes(&text, path.parent(), &path.display().to_string())
        }
    }
}

/// Reads a shader file into memory.
pub(crate) fn read_shader_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source_error| ShaderError::LoadError {
        path: path.display().to_string(),
        source_error,
    })
}

/// Replaces every include directive in `source` with the named file's
/// expanded contents.
///
/// `origin` only labels errors; it is never read from disk.
pub(crate) fn expand_includes(
    source: &str,
    include_dir: Option<&Path>,
    origin: &str,
) -> Result<String, ShaderError> {
    expand_recursive(source, include_dir, origin, 0)
}

fn expand_recursive(
    source: &str,
    include_dir: Option<&Path>,
    origin: &str,
    depth: u32,
) -> Result<String, ShaderError> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(ShaderError::IncludeError {
            path: origin.to_string(),
            details: "include depth limit exceeded".to_string(),
        });
    }

    let mut expanded = String::with_capacity(source.len());
    for line in source.lines() {
        let trimmed = line.trim_start();
        let Some(directive) = trimmed.strip_prefix("#include") else {
            expanded.push_str(line);
            expanded.push('\n');
            continue;
        };

        let name = parse_include_name(directive).ok_or_else(|| ShaderError::IncludeError {
            path: origin.to_string(),
            details: format!("malformed include directive '{}'", line.trim()),
        })?;
        let dir = include_dir.ok_or_else(|| ShaderError::IncludeError {
            path: origin.to_string(),
            details: format!("'{name}' included but no include directory is available"),
        })?;

        let include_path = dir.join(name);
        let included =
            std::fs::read_to_string(&include_path).map_err(|e| ShaderError::IncludeError {
                path: origin.to_string(),
                details: format!("could not read '{}': {e}", include_path.display()),
            })?;
        let nested = expand_recursive(&included, include_dir, origin, depth + 1)?;
        expanded.push_str(&nested);
    }
    Ok(expanded)
}

/// Pulls the quoted file name out of the text following `#include`.
fn parse_include_name(directive: &str) -> Option<&str> {
    let rest = directive.trim().strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ember_gl_include_{tag}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn expands_nested_includes_in_order() {
        let dir = scratch_dir("nested");
        std::fs::write(dir.join("common.glsl"), "vec3 ambient();\n").unwrap();
        std::fs::write(
            dir.join("lighting.glsl"),
            "#include \"common.glsl\"\nvec3 shade();\n",
        )
        .unwrap();

        let source = "#version 460 core\n#include \"lighting.glsl\"\nvoid main() {}\n";
        let expanded = expand_includes(source, Some(&dir), "main.frag").unwrap();
        assert_eq!(
            expanded,
            "#version 460 core\nvec3 ambient();\nvec3 shade();\nvoid main() {}\n"
        );
        assert!(!expanded.contains("#include"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn inline_sources_reject_includes() {
        let result = expand_includes("#include \"a.glsl\"\n", None, "<inline>");
        match result {
            Err(ShaderError::IncludeError { path, details }) => {
                assert_eq!(path, "<inline>");
                assert!(details.contains("no include directory"));
            }
            other => panic!("expected an include error, got {other:?}"),
        }
    }

    #[test]
    fn include_cycles_hit_the_depth_limit() {
        let dir = scratch_dir("cycle");
        std::fs::write(dir.join("self.glsl"), "#include \"self.glsl\"\n").unwrap();

        let result = expand_includes("#include \"self.glsl\"\n", Some(&dir), "self.glsl");
        match result {
            Err(ShaderError::IncludeError { details, .. }) => {
                assert_eq!(details, "include depth limit exceeded");
            }
            other => panic!("expected an include error, got {other:?}"),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn malformed_directives_are_rejected() {
        let result = expand_includes("#include <common.glsl>\n", Some(Path::new(".")), "main.vert");
        assert!(matches!(result, Err(ShaderError::IncludeError { .. })));
    }

    #[test]
    fn plain_source_passes_through() {
        let source = "#version 460 core\nvoid main() {}\n";
        let expanded = expand_includes(source, None, "<inline>").unwrap();
        assert_eq!(expanded, source);
    }

    #[test]
    fn missing_files_surface_the_io_error() {
        let result = read_shader_source(Path::new("/nonexistent/missing.vert"));
        match result {
            Err(ShaderError::LoadError { path, .. }) => {
                assert_eq!(path, "/nonexistent/missing.vert");
            }
            other => panic!("expected a load error, got {other:?}"),
        }
    }
}

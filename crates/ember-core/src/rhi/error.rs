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

//! Defines the error hierarchy for rendering operations.
//!
//! Errors nest from the specific to the general: a shader failure wraps
//! into a pipeline error, which wraps into a resource error, which wraps
//! into a render error. Each layer keeps its
//! [`source`](std::error::Error::source) chain intact.

use std::error::Error;
use std::fmt;

use crate::rhi::format::Format;
use crate::rhi::pipeline::ShaderStage;

/// The kind of resource a handle refers to, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A texture resource.
    Texture,
    /// A buffer resource.
    Buffer,
    /// A framebuffer resource.
    Framebuffer,
    /// A graphics pipeline.
    GraphicsPipeline,
    /// A compute pipeline.
    ComputePipeline,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Texture => write!(f, "texture"),
            ResourceKind::Buffer => write!(f, "buffer"),
            ResourceKind::Framebuffer => write!(f, "framebuffer"),
            ResourceKind::GraphicsPipeline => write!(f, "graphics pipeline"),
            ResourceKind::ComputePipeline => write!(f, "compute pipeline"),
        }
    }
}

/// Errors arising while loading or compiling a shader stage.
#[derive(Debug)]
pub enum ShaderError {
    /// Reading shader source from disk failed.
    LoadError {
        /// Path of the file that could not be read.
        path: String,
        /// The underlying I/O error.
        source_error: std::io::Error,
    },
    /// Resolving include directives in shader source failed.
    IncludeError {
        /// Path (or label) of the source being expanded.
        path: String,
        /// What went wrong while expanding.
        details: String,
    },
    /// The backend rejected the stage at compile time.
    CompilationError {
        /// The stage that failed.
        stage: ShaderStage,
        /// Label of the pipeline the stage belongs to.
        pipeline_label: String,
        /// The backend's compile log.
        details: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::LoadError { path, source_error } => {
                write!(f, "Failed to read shader source from '{path}': {source_error}")
            }
            ShaderError::IncludeError { path, details } => {
                write!(f, "Failed to process includes for '{path}': {details}")
            }
            ShaderError::CompilationError {
                stage,
                pipeline_label,
                details,
            } => {
                write!(f, "{stage} shader in program '{pipeline_label}' has errors:\n{details}")
            }
        }
    }
}

impl Error for ShaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ShaderError::LoadError { source_error, .. } => Some(source_error),
            _ => None,
        }
    }
}

/// Errors arising while building a pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// One of the pipeline's shader stages failed.
    Shader(ShaderError),
    /// The backend rejected the program at link time.
    LinkError {
        /// Label of the pipeline being linked.
        pipeline_label: String,
        /// The backend's link log.
        details: String,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Shader(e) => write!(f, "Shader error: {e}"),
            PipelineError::LinkError {
                pipeline_label,
                details,
            } => {
                write!(f, "Program '{pipeline_label}' has linking errors:\n{details}")
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Shader(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShaderError> for PipelineError {
    fn from(e: ShaderError) -> Self {
        PipelineError::Shader(e)
    }
}

/// Errors arising from resource creation, lookup, and use on a device.
#[derive(Debug)]
pub enum ResourceError {
    /// Building a pipeline failed.
    Pipeline(PipelineError),
    /// A handle did not resolve to a live resource.
    NotFound {
        /// The kind of resource looked up.
        kind: ResourceKind,
        /// The handle's slot index.
        index: usize,
    },
    /// A write reached past the end of a resource.
    OutOfBounds {
        /// The kind of resource written.
        kind: ResourceKind,
        /// The handle's slot index.
        index: usize,
    },
    /// A clear value's numeric class disagrees with its attachment format.
    ClearValueMismatch {
        /// Label of the framebuffer being created.
        framebuffer: String,
        /// The offending color slot.
        slot: usize,
        /// The attachment format at that slot.
        format: Format,
    },
    /// A descriptor is self-contradictory.
    InvalidDescriptor(String),
    /// The texture already has a resident shader-visible handle.
    AlreadyResident {
        /// The texture handle's slot index.
        index: usize,
    },
    /// The texture has no resident shader-visible handle.
    NotResident {
        /// The texture handle's slot index.
        index: usize,
    },
    /// The buffer was created without [`BufferUsage::DYNAMIC_UPDATE`](crate::rhi::buffer::BufferUsage::DYNAMIC_UPDATE).
    ImmutableBuffer {
        /// The buffer handle's slot index.
        index: usize,
    },
    /// A draw or dispatch was issued with no pipeline bound.
    NoPipelineBound,
    /// The backend cannot express the requested operation.
    Unsupported(String),
    /// An error reported by the backend outside any other category.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Pipeline(e) => write!(f, "Pipeline error: {e}"),
            ResourceError::NotFound { kind, index } => {
                write!(f, "{kind} {index} was not found")
            }
            ResourceError::OutOfBounds { kind, index } => {
                write!(f, "Write exceeds the bounds of {kind} {index}")
            }
            ResourceError::ClearValueMismatch {
                framebuffer,
                slot,
                format,
            } => {
                write!(
                    f,
                    "Clear value class does not match {format:?} on color slot {slot} of framebuffer '{framebuffer}'"
                )
            }
            ResourceError::InvalidDescriptor(details) => {
                write!(f, "Invalid descriptor: {details}")
            }
            ResourceError::AlreadyResident { index } => {
                write!(f, "Texture {index} is already resident")
            }
            ResourceError::NotResident { index } => {
                write!(f, "Texture {index} is not resident")
            }
            ResourceError::ImmutableBuffer { index } => {
                write!(f, "Buffer {index} was not created with DYNAMIC_UPDATE")
            }
            ResourceError::NoPipelineBound => write!(f, "No pipeline is currently bound"),
            ResourceError::Unsupported(details) => {
                write!(f, "Unsupported operation: {details}")
            }
            ResourceError::BackendError(details) => write!(f, "Backend error: {details}"),
        }
    }
}

impl Error for ResourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ResourceError::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PipelineError> for ResourceError {
    fn from(e: PipelineError) -> Self {
        ResourceError::Pipeline(e)
    }
}

impl From<ShaderError> for ResourceError {
    fn from(e: ShaderError) -> Self {
        ResourceError::Pipeline(PipelineError::Shader(e))
    }
}

/// Top-level errors reported by a renderer.
#[derive(Debug)]
pub enum RenderError {
    /// The renderer was used before a successful load.
    NotInitialized,
    /// Loading the renderer's own resources failed.
    InitializationFailed(String),
    /// A device operation failed.
    ResourceError(ResourceError),
    /// A mesh asset referenced by an entity does not exist.
    MeshNotFound {
        /// The name the entity referenced.
        name: String,
    },
    /// A material asset referenced by an entity does not exist.
    MaterialNotFound {
        /// The name the entity referenced.
        name: String,
    },
    /// An unexpected internal condition.
    Internal(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotInitialized => write!(f, "Renderer has not been initialized"),
            RenderError::InitializationFailed(details) => {
                write!(f, "Renderer initialization failed: {details}")
            }
            RenderError::ResourceError(e) => write!(f, "Resource error: {e}"),
            RenderError::MeshNotFound { name } => {
                write!(f, "Mesh asset '{name}' was not found")
            }
            RenderError::MaterialNotFound { name } => {
                write!(f, "Material asset '{name}' was not found")
            }
            RenderError::Internal(details) => write!(f, "Internal renderer error: {details}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RenderError::ResourceError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(e: ResourceError) -> Self {
        RenderError::ResourceError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_error_display() {
        let error = ShaderError::CompilationError {
            stage: ShaderStage::Fragment,
            pipeline_label: "GeometryPass".to_string(),
            details: "0:12: 'albedo' : undeclared identifier".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Fragment shader in program 'GeometryPass' has errors:\n0:12: 'albedo' : undeclared identifier"
        );

        let error = ShaderError::IncludeError {
            path: "shaders/common.glsl".to_string(),
            details: "include depth limit exceeded".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to process includes for 'shaders/common.glsl': include depth limit exceeded"
        );
    }

    #[test]
    fn resource_error_display_wrapping_shader_error() {
        let shader_error = ShaderError::CompilationError {
            stage: ShaderStage::Vertex,
            pipeline_label: "Sky".to_string(),
            details: "syntax error".to_string(),
        };
        let resource_error: ResourceError = shader_error.into();
        assert_eq!(
            resource_error.to_string(),
            "Pipeline error: Shader error: Vertex shader in program 'Sky' has errors:\nsyntax error"
        );

        let pipeline_source = resource_error.source().expect("pipeline source");
        let shader_source = pipeline_source.source().expect("shader source");
        assert!(shader_source.to_string().contains("Vertex shader"));
    }

    #[test]
    fn render_error_display_wrapping_resource_error() {
        let error: RenderError = ResourceError::NotFound {
            kind: ResourceKind::Framebuffer,
            index: 4,
        }
        .into();
        assert_eq!(error.to_string(), "Resource error: framebuffer 4 was not found");
        assert!(error.source().is_some());
    }

    #[test]
    fn lookup_and_residency_error_display() {
        assert_eq!(
            ResourceError::NotFound {
                kind: ResourceKind::GraphicsPipeline,
                index: 2
            }
            .to_string(),
            "graphics pipeline 2 was not found"
        );
        assert_eq!(
            ResourceError::AlreadyResident { index: 9 }.to_string(),
            "Texture 9 is already resident"
        );
        assert_eq!(
            ResourceError::ImmutableBuffer { index: 1 }.to_string(),
            "Buffer 1 was not created with DYNAMIC_UPDATE"
        );
    }

    #[test]
    fn clear_value_mismatch_display() {
        let error = ResourceError::ClearValueMismatch {
            framebuffer: "GeometryPass".to_string(),
            slot: 1,
            format: Format::R32G32Uint,
        };
        assert_eq!(
            error.to_string(),
            "Clear value class does not match R32G32Uint on color slot 1 of framebuffer 'GeometryPass'"
        );
    }

    #[test]
    fn link_error_display() {
        let error = PipelineError::LinkError {
            pipeline_label: "Composite".to_string(),
            details: "unresolved symbol main".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Program 'Composite' has linking errors:\nunresolved symbol main"
        );
    }

    #[test]
    fn mesh_not_found_display() {
        let error = RenderError::MeshNotFound {
            name: "viking_room".to_string(),
        };
        assert_eq!(error.to_string(), "Mesh asset 'viking_room' was not found");
        assert!(error.source().is_none());
    }
}

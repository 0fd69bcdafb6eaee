use crate::error::SceneError;
use crate::shader::{compile_outcome, link_outcome, Diagnostic, Severity, ShaderStage};

fn diagnostic(m: &wgpu::CompilationMessage) -> Diagnostic {
    let severity = match m.message_type {
        wgpu::CompilationMessageType::Error => Severity::Error,
        wgpu::CompilationMessageType::Warning => Severity::Warning,
        wgpu::CompilationMessageType::Info => Severity::Info,
    };
    Diagnostic {
        severity,
        line: m.location.as_ref().map(|l| l.line_number),
        message: m.message.clone(),
    }
}

/// Compiles one WGSL stage, turning compiler messages into `ShaderCompile`.
pub async fn compile_stage(
    device: &wgpu::Device,
    stage: ShaderStage,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, SceneError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let info = module.get_compilation_info().await;
    let scoped = device.pop_error_scope().await;

    let mut diagnostics: Vec<Diagnostic> = info.messages.iter().map(diagnostic).collect();
    if let Some(err) = scoped {
        if !diagnostics.iter().any(|d| d.severity == Severity::Error) {
            diagnostics.push(Diagnostic::error(err.to_string()));
        }
    }
    compile_outcome(stage, &diagnostics)?;
    log::debug!("[gpu] compiled {label}");
    Ok(module)
}

/// Builds a render pipeline; any validation error becomes `ShaderLink`.
pub async fn link_pipeline(
    device: &wgpu::Device,
    desc: &wgpu::RenderPipelineDescriptor<'_>,
) -> Result<wgpu::RenderPipeline, SceneError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(desc);
    let scoped = device.pop_error_scope().await;
    link_outcome(scoped.map(|e| e.to_string()))?;
    Ok(pipeline)
}

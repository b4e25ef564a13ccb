//! Filas de referencia de la plataforma.

use serde_json::json;

use super::{SeedSet, SeedValue};

/// Construye una fila a partir de valores heterogéneos convertibles a `SeedValue`.
macro_rules! fila {
    ($($v:expr),+ $(,)?) => {
        vec![$(SeedValue::from($v)),+]
    };
}

const BASICAS: &[&str] = &["codigo", "nombre", "descripcion"];

fn tipos_usuario() -> SeedSet {
    SeedSet::new("tipos_usuario", "codigo", &["codigo", "nombre", "descripcion", "nivel_acceso"])
        .row(fila!["admin", "Administrador", "Usuario con permisos de administración", 10])
        .row(fila!["docente", "Docente", "Profesor o instructor", 5])
        .row(fila!["estudiante", "Estudiante", "Estudiante regular", 3])
        .row(fila!["aspirante", "Aspirante", "Postulante a programas", 1])
}

fn estados_usuario() -> SeedSet {
    SeedSet::new("estados_usuario", "codigo", BASICAS)
        .row(fila!["activo", "Activo", "Usuario activo en el sistema"])
        .row(fila!["inactivo", "Inactivo", "Usuario inactivo temporalmente"])
        .row(fila!["bloqueado", "Bloqueado", "Usuario bloqueado por infracciones"])
        .row(fila!["pendiente", "Pendiente", "Esperando verificación de email"])
}

fn tipos_contenido() -> SeedSet {
    SeedSet::new("tipos_contenido", "codigo", &["codigo", "nombre", "descripcion", "extensiones_permitidas"])
        .row(fila!["video", "Video", "Contenido multimedia de video", json!(["mp4", "avi", "mov", "mkv"])])
        .row(fila!["audio", "Audio", "Contenido multimedia de audio", json!(["mp3", "wav", "ogg", "m4a"])])
        .row(fila!["documento", "Documento", "Documentos digitales", json!(["pdf", "doc", "docx", "ppt", "pptx"])])
        .row(fila!["imagen", "Imagen", "Contenido visual", json!(["jpg", "jpeg", "png", "gif", "bmp"])])
        .row(fila!["enlace", "Enlace", "Enlace externo", json!([])])
}

fn estados_contenido() -> SeedSet {
    SeedSet::new("estados_contenido", "codigo", BASICAS)
        .row(fila!["borrador", "Borrador", "Contenido en edición"])
        .row(fila!["revision", "En revisión", "Esperando aprobación"])
        .row(fila!["publicado", "Publicado", "Contenido disponible"])
        .row(fila!["archivado", "Archivado", "Contenido archivado"])
        .row(fila!["rechazado", "Rechazado", "Contenido rechazado"])
}

fn tipos_interaccion() -> SeedSet {
    SeedSet::new("tipos_interaccion", "codigo", &["codigo", "nombre", "descripcion", "incrementa_contador"])
        .row(fila!["like", "Like", "Me gusta", true])
        .row(fila!["dislike", "Dislike", "No me gusta", true])
        .row(fila!["vista", "Vista", "Visualización del contenido", true])
        .row(fila!["compartir", "Compartir", "Compartir contenido", true])
        .row(fila!["comentario", "Comentario", "Comentar contenido", false])
}

fn tipos_reporte() -> SeedSet {
    SeedSet::new("tipos_reporte", "codigo", &["codigo", "nombre", "descripcion", "gravedad"])
        .row(fila!["spam", "Spam", "Contenido no deseado", 1])
        .row(fila!["inapropiado", "Inapropiado", "Contenido inapropiado", 3])
        .row(fila!["derechos", "Derechos de autor", "Violación de derechos de autor", 4])
        .row(fila!["acoso", "Acoso", "Contenido acosador", 5])
        .row(fila!["otro", "Otro", "Otro tipo de reporte", 2])
}

fn estados_reporte() -> SeedSet {
    SeedSet::new("estados_reporte", "codigo", BASICAS)
        .row(fila!["pendiente", "Pendiente", "Reporte pendiente de revisión"])
        .row(fila!["revisado", "Revisado", "Reporte en proceso de revisión"])
        .row(fila!["resuelto", "Resuelto", "Reporte resuelto"])
        .row(fila!["desestimado", "Desestimado", "Reporte desestimado"])
}

fn niveles_log() -> SeedSet {
    SeedSet::new("niveles_log", "codigo", BASICAS)
        .row(fila!["debug", "Debug", "Mensajes de depuración"])
        .row(fila!["info", "Información", "Mensajes informativos"])
        .row(fila!["warning", "Advertencia", "Mensajes de advertencia"])
        .row(fila!["error", "Error", "Mensajes de error"])
        .row(fila!["critical", "Crítico", "Mensajes críticos"])
}

fn tipos_notificacion() -> SeedSet {
    SeedSet::new("tipos_notificacion", "codigo", &["codigo", "nombre", "descripcion", "plantilla_mensaje"])
        .row(fila!["sistema", "Sistema", "Notificación del sistema", "Notificación del sistema: {mensaje}"])
        .row(fila!["seguimiento", "Seguimiento", "Notificación de seguimiento", "{usuario} empezó a seguirte"])
        .row(fila!["comentario", "Comentario", "Notificación de comentario", "{usuario} comentó en tu contenido"])
        .row(fila!["like", "Like", "Notificación de like", "A {usuario} le gusta tu contenido"])
        .row(fila!["reporte", "Reporte", "Notificación de reporte", "Tu reporte ha sido {estado}"])
}

fn estados_general() -> SeedSet {
    SeedSet::new("estados_general", "codigo", &["codigo", "nombre", "descripcion", "tipo_entidad"])
        .row(fila!["activo", "Activo", "Registro activo", "general"])
        .row(fila!["inactivo", "Inactivo", "Registro inactivo", "general"])
        .row(fila!["pendiente", "Pendiente", "Esperando aprobación", "general"])
        .row(fila!["eliminado", "Eliminado", "Registro eliminado", "general"])
}

fn roles_sistema() -> SeedSet {
    SeedSet::new("roles_sistema", "codigo_rol", &["codigo_rol", "nombre_rol", "descripcion", "permisos"])
        .row(fila!["superadmin", "Super Administrador", "Acceso total al sistema", json!(["*"])])
        .row(fila!["admin", "Administrador", "Administrador del sistema",
                   json!(["users.manage", "content.manage", "reports.manage"])])
        .row(fila!["moderador", "Moderador", "Moderador de contenido", json!(["content.moderate", "reports.review"])])
        .row(fila!["docente", "Docente", "Rol para profesores", json!(["content.create", "content.edit", "courses.manage"])])
        .row(fila!["estudiante", "Estudiante", "Rol para estudiantes", json!(["content.view", "courses.enroll"])])
}

/// Los 11 conjuntos de referencia, en orden de carga.
pub fn platform_seeds() -> Vec<SeedSet> {
    vec![tipos_usuario(),
         estados_usuario(),
         tipos_contenido(),
         estados_contenido(),
         tipos_interaccion(),
         tipos_reporte(),
         estados_reporte(),
         niveles_log(),
         tipos_notificacion(),
         estados_general(),
         roles_sistema()]
}

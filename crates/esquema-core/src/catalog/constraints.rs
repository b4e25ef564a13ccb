//! Llaves foráneas de la plataforma (53), en el orden en que se aplican.

use crate::model::ForeignKey;

const USUARIOS: (&str, &str) = ("usuarios", "id_usuario");
const CONTENIDOS: (&str, &str) = ("contenidos", "id_contenido");
const ESTADOS_GENERAL: (&str, &str) = ("estados_general", "id_estado_general");
const ADMINISTRADORES: (&str, &str) = ("administradores", "id_administrador");

fn fk(name: &'static str, table: &'static str, column: &'static str, target: (&'static str, &'static str)) -> ForeignKey {
    ForeignKey::new(name, table, column, target.0, target.1)
}

pub fn platform_foreign_keys() -> Vec<ForeignKey> {
    vec![
        // usuarios
        fk("fk_usuarios_tipos_usuario", "usuarios", "id_tipo_usuario", ("tipos_usuario", "id_tipo_usuario")),
        fk("fk_usuarios_estados_usuario", "usuarios", "id_estado_usuario", ("estados_usuario", "id_estado_usuario")),
        // perfiles
        fk("fk_perfiles_usuarios", "perfiles", "id_usuario", USUARIOS),
        fk("fk_estudiantes_usuarios", "estudiantes", "id_usuario", USUARIOS),
        fk("fk_docentes_usuarios", "docentes", "id_usuario", USUARIOS),
        fk("fk_aspirantes_usuarios", "aspirantes", "id_usuario", USUARIOS),
        fk("fk_administradores_usuarios", "administradores", "id_usuario", USUARIOS),
        // categorías y cursos
        fk("fk_categorias_categorias_padre", "categorias", "id_categoria_padre", ("categorias", "id_categoria")),
        fk("fk_categorias_estados_general", "categorias", "id_estado_general", ESTADOS_GENERAL),
        fk("fk_cursos_docentes", "cursos", "id_docente_responsable", ("docentes", "id_docente")),
        fk("fk_cursos_estados_general", "cursos", "id_estado_general", ESTADOS_GENERAL),
        // contenido
        fk("fk_contenidos_usuarios", "contenidos", "id_autor", USUARIOS),
        fk("fk_contenidos_tipos_contenido", "contenidos", "id_tipo_contenido", ("tipos_contenido", "id_tipo_contenido")),
        fk("fk_contenidos_estados_contenido", "contenidos", "id_estado_contenido", ("estados_contenido", "id_estado_contenido")),
        fk("fk_contenido_categorias_contenidos", "contenido_categorias", "id_contenido", CONTENIDOS),
        fk("fk_contenido_categorias_categorias", "contenido_categorias", "id_categoria", ("categorias", "id_categoria")),
        fk("fk_contenido_cursos_contenidos", "contenido_cursos", "id_contenido", CONTENIDOS),
        fk("fk_contenido_cursos_cursos", "contenido_cursos", "id_curso", ("cursos", "id_curso")),
        fk("fk_contenido_palabras_clave_contenidos", "contenido_palabras_clave", "id_contenido", CONTENIDOS),
        // interacciones
        fk("fk_interacciones_usuarios", "interacciones", "id_usuario", USUARIOS),
        fk("fk_interacciones_contenidos", "interacciones", "id_contenido", CONTENIDOS),
        fk("fk_interacciones_tipos_interaccion", "interacciones", "id_tipo_interaccion", ("tipos_interaccion", "id_tipo_interaccion")),
        fk("fk_comentarios_usuarios", "comentarios", "id_usuario", USUARIOS),
        fk("fk_comentarios_contenidos", "comentarios", "id_contenido", CONTENIDOS),
        fk("fk_comentarios_comentarios_padre", "comentarios", "id_comentario_padre", ("comentarios", "id_comentario")),
        fk("fk_comentarios_estados_general", "comentarios", "id_estado_general", ESTADOS_GENERAL),
        // reportes
        fk("fk_reportes_usuarios_reportero", "reportes", "id_usuario_reportero", USUARIOS),
        fk("fk_reportes_contenidos", "reportes", "id_contenido", CONTENIDOS),
        fk("fk_reportes_comentarios", "reportes", "id_comentario", ("comentarios", "id_comentario")),
        fk("fk_reportes_tipos_reporte", "reportes", "id_tipo_reporte", ("tipos_reporte", "id_tipo_reporte")),
        fk("fk_reportes_estados_reporte", "reportes", "id_estado_reporte", ("estados_reporte", "id_estado_reporte")),
        fk("fk_reportes_administradores", "reportes", "id_administrador_resuelve", ADMINISTRADORES),
        // seguimiento y favoritos
        fk("fk_seguimientos_usuarios_seguidor", "seguimientos", "id_usuario_seguidor", USUARIOS),
        fk("fk_seguimientos_usuarios_seguido", "seguimientos", "id_usuario_seguido", USUARIOS),
        fk("fk_favoritos_usuarios", "favoritos", "id_usuario", USUARIOS),
        fk("fk_favoritos_contenidos", "favoritos", "id_contenido", CONTENIDOS),
        // historial
        fk("fk_historial_busquedas_usuarios", "historial_busquedas", "id_usuario", USUARIOS),
        fk("fk_historial_vistas_usuarios", "historial_vistas", "id_usuario", USUARIOS),
        fk("fk_historial_vistas_contenidos", "historial_vistas", "id_contenido", CONTENIDOS),
        // roles
        fk("fk_usuario_roles_usuarios", "usuario_roles", "id_usuario", USUARIOS),
        fk("fk_usuario_roles_roles", "usuario_roles", "id_rol", ("roles_sistema", "id_rol")),
        fk("fk_usuario_roles_administradores", "usuario_roles", "id_administrador_asigna", ADMINISTRADORES),
        // logs y notificaciones
        fk("fk_logs_sistema_niveles_log", "logs_sistema", "id_nivel_log", ("niveles_log", "id_nivel_log")),
        fk("fk_logs_sistema_usuarios", "logs_sistema", "id_usuario", USUARIOS),
        fk("fk_notificaciones_usuarios", "notificaciones", "id_usuario_destino", USUARIOS),
        fk("fk_notificaciones_tipos_notificacion", "notificaciones", "id_tipo_notificacion", ("tipos_notificacion", "id_tipo_notificacion")),
        // sesiones y FAQ
        fk("fk_sesiones_activas_usuarios", "sesiones_activas", "id_usuario", USUARIOS),
        fk("fk_sesiones_activas_estados_general", "sesiones_activas", "id_estado_general", ESTADOS_GENERAL),
        fk("fk_preguntas_frecuentes_faq_categorias", "preguntas_frecuentes", "id_faq_categoria", ("faq_categorias", "id_faq_categoria")),
        fk("fk_preguntas_frecuentes_estados_general", "preguntas_frecuentes", "id_estado_general", ESTADOS_GENERAL),
        fk("fk_faq_categorias_estados_general", "faq_categorias", "id_estado_general", ESTADOS_GENERAL),
        // preferencias e intereses
        fk("fk_preferencias_usuario_usuarios", "preferencias_usuario", "id_usuario", USUARIOS),
        fk("fk_intereses_usuario_usuarios", "intereses_usuario", "id_usuario", USUARIOS),
    ]
}

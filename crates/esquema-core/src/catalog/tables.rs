//! Tablas de la plataforma, en orden de declaración.
//!
//! Las columnas que apuntan a otras tablas se declaran aquí como enteros
//! simples; las llaves foráneas se agregan después (ver `constraints`).

use crate::model::{Column, DefaultValue, TableDef, TableGroup};

fn codigo() -> Column { Column::varchar("codigo", 20).unique().not_null() }
fn nombre_corto() -> Column { Column::varchar("nombre", 50).not_null() }
fn descripcion() -> Column { Column::text("descripcion") }
fn id_ref(name: &'static str) -> Column { Column::integer(name).not_null() }

/// Tabla de referencia con la forma común `id / codigo / nombre / descripcion`.
fn referencia(name: &'static str, id: &'static str) -> TableDef {
    TableDef::new(name, TableGroup::Referencia).column(Column::serial(id))
                                               .column(codigo())
                                               .column(nombre_corto())
                                               .column(descripcion())
}

fn reference_tables() -> Vec<TableDef> {
    vec![
        referencia("tipos_usuario", "id_tipo_usuario")
            .column(Column::integer("nivel_acceso").default(DefaultValue::Int(0))),
        referencia("estados_usuario", "id_estado_usuario"),
        referencia("tipos_contenido", "id_tipo_contenido").column(Column::json("extensiones_permitidas")),
        referencia("estados_contenido", "id_estado_contenido"),
        referencia("tipos_interaccion", "id_tipo_interaccion")
            .column(Column::boolean("incrementa_contador").default(DefaultValue::Bool(true))),
        referencia("tipos_reporte", "id_tipo_reporte")
            .column(Column::integer("gravedad").default(DefaultValue::Int(1))),
        referencia("estados_reporte", "id_estado_reporte"),
        referencia("niveles_log", "id_nivel_log"),
        referencia("tipos_notificacion", "id_tipo_notificacion").column(Column::text("plantilla_mensaje")),
        referencia("estados_general", "id_estado_general")
            .column(Column::varchar("tipo_entidad", 50).not_null()),
    ]
}

fn user_tables() -> Vec<TableDef> {
    vec![TableDef::new("usuarios", TableGroup::Usuarios)
        .column(Column::serial("id_usuario"))
        .column(id_ref("id_tipo_usuario"))
        .column(id_ref("id_estado_usuario"))
        .column(Column::varchar("email", 255).unique().not_null())
        .column(Column::varchar("password_hash", 255).not_null())
        .column(Column::timestamp("fecha_registro").default_now())
        .column(Column::timestamp("ultimo_login"))
        .column(Column::varchar("token_verificacion", 255))
        .column(Column::varchar("token_recuperacion", 255))
        .column(Column::timestamp("fecha_expiracion_token"))]
}

fn profile_tables() -> Vec<TableDef> {
    let g = TableGroup::Perfiles;
    vec![
        TableDef::new("perfiles", g)
            .column(Column::serial("id_perfil"))
            .column(Column::integer("id_usuario").unique().not_null())
            .column(Column::varchar("nombre", 100).not_null())
            .column(Column::varchar("apellido", 100).not_null())
            .column(Column::varchar("telefono", 20))
            .column(Column::varchar("avatar_url", 500))
            .column(Column::text("biografia"))
            .column(Column::timestamp("fecha_actualizacion").default_now()),
        TableDef::new("estudiantes", g)
            .column(Column::serial("id_estudiante"))
            .column(Column::integer("id_usuario").unique().not_null())
            .column(Column::varchar("codigo_estudiante", 50).unique().not_null())
            .column(Column::varchar("programa_academico", 100))
            .column(Column::integer("semestre"))
            .column(Column::date("fecha_ingreso")),
        TableDef::new("docentes", g)
            .column(Column::serial("id_docente"))
            .column(Column::integer("id_usuario").unique().not_null())
            .column(Column::varchar("codigo_docente", 50).unique().not_null())
            .column(Column::varchar("departamento", 100))
            .column(Column::varchar("titulo_academico", 100))
            .column(Column::varchar("especialidad", 100))
            .column(Column::date("fecha_contratacion")),
        TableDef::new("aspirantes", g)
            .column(Column::serial("id_aspirante"))
            .column(Column::integer("id_usuario").unique().not_null())
            .column(Column::varchar("documento_identidad", 50).unique().not_null())
            .column(Column::date("fecha_nacimiento"))
            .column(Column::varchar("ciudad", 100))
            .column(Column::varchar("pais", 100))
            .column(Column::varchar("programa_interes", 100))
            .column(Column::date("fecha_solicitud").default_now())
            .column(Column::boolean("acepto_terminos").default(DefaultValue::Bool(false)))
            .column(Column::timestamp("fecha_aceptacion_terminos")),
        TableDef::new("administradores", g)
            .column(Column::serial("id_administrador"))
            .column(Column::integer("id_usuario").unique().not_null())
            .column(Column::varchar("rol_administrativo", 100).not_null())
            .column(Column::integer("nivel_acceso").default(DefaultValue::Int(1)))
            .column(Column::varchar("departamento", 100))
            .column(Column::date("fecha_asignacion").default_now()),
    ]
}

fn preference_tables() -> Vec<TableDef> {
    let g = TableGroup::Preferencias;
    vec![
        TableDef::new("preferencias_usuario", g)
            .column(Column::serial("id_preferencia"))
            .column(id_ref("id_usuario"))
            .column(Column::varchar("tipo_configuracion", 50).not_null())
            .column(Column::varchar("clave_configuracion", 100).not_null())
            .column(Column::json("valor_configuracion"))
            .column(Column::timestamp("fecha_creacion").default_now())
            .column(Column::timestamp("fecha_actualizacion").default_now()),
        TableDef::new("intereses_usuario", g)
            .column(Column::serial("id_interes"))
            .column(id_ref("id_usuario"))
            .column(Column::varchar("tag_interes", 100).not_null())
            .column(Column::integer("peso_interes").default(DefaultValue::Int(1)))
            .column(Column::timestamp("fecha_agregado").default_now()),
    ]
}

fn category_course_tables() -> Vec<TableDef> {
    let g = TableGroup::CategoriasCursos;
    vec![
        TableDef::new("categorias", g)
            .column(Column::serial("id_categoria"))
            .column(Column::varchar("nombre", 100).not_null())
            .column(descripcion())
            .column(Column::integer("id_categoria_padre"))
            .column(Column::varchar("icono", 100))
            .column(Column::varchar("color", 20))
            .column(id_ref("id_estado_general"))
            .column(Column::timestamp("fecha_creacion").default_now()),
        TableDef::new("cursos", g)
            .column(Column::serial("id_curso"))
            .column(Column::varchar("codigo_curso", 50).unique().not_null())
            .column(Column::varchar("nombre", 200).not_null())
            .column(descripcion())
            .column(Column::integer("id_docente_responsable"))
            .column(id_ref("id_estado_general"))
            .column(Column::boolean("es_publico").default(DefaultValue::Bool(false)))
            .column(Column::timestamp("fecha_creacion").default_now())
            .column(Column::timestamp("fecha_actualizacion").default_now()),
    ]
}

fn content_tables() -> Vec<TableDef> {
    let g = TableGroup::Contenido;
    vec![
        TableDef::new("contenidos", g)
            .column(Column::serial("id_contenido"))
            .column(Column::varchar("titulo", 255).not_null())
            .column(descripcion())
            .column(id_ref("id_autor"))
            .column(id_ref("id_tipo_contenido"))
            .column(id_ref("id_estado_contenido"))
            .column(Column::varchar("url_contenido", 500).not_null())
            .column(Column::varchar("url_thumbnail", 500))
            .column(Column::integer("duracion_segundos"))
            .column(Column::bigint("tamanio_bytes"))
            .column(Column::boolean("tiene_subtitulos").default(DefaultValue::Bool(false)))
            .column(Column::varchar("url_subtitulos", 500))
            .column(Column::boolean("permite_comentarios").default(DefaultValue::Bool(true)))
            .column(Column::boolean("permite_descargas").default(DefaultValue::Bool(false)))
            .column(Column::varchar("visibilidad", 20).default(DefaultValue::Text("publico")))
            .column(Column::timestamp("fecha_creacion").default_now())
            .column(Column::timestamp("fecha_publicacion"))
            .column(Column::timestamp("fecha_actualizacion").default_now()),
        TableDef::new("contenido_categorias", g)
            .column(Column::serial("id_contenido_categoria"))
            .column(id_ref("id_contenido"))
            .column(id_ref("id_categoria"))
            .column(Column::timestamp("fecha_asignacion").default_now()),
        TableDef::new("contenido_cursos", g)
            .column(Column::serial("id_contenido_curso"))
            .column(id_ref("id_contenido"))
            .column(id_ref("id_curso"))
            .column(Column::integer("orden_en_curso").default(DefaultValue::Int(0)))
            .column(Column::timestamp("fecha_asignacion").default_now()),
        TableDef::new("contenido_palabras_clave", g)
            .column(Column::serial("id_palabra_clave"))
            .column(id_ref("id_contenido"))
            .column(Column::varchar("palabra_clave", 100).not_null())
            .column(Column::timestamp("fecha_agregado").default_now()),
    ]
}

fn interaction_tables() -> Vec<TableDef> {
    let g = TableGroup::Interacciones;
    vec![
        TableDef::new("interacciones", g)
            .column(Column::serial("id_interaccion"))
            .column(id_ref("id_usuario"))
            .column(id_ref("id_contenido"))
            .column(id_ref("id_tipo_interaccion"))
            .column(Column::integer("valor_interaccion").default(DefaultValue::Int(1)))
            .column(Column::json("metadata"))
            .column(Column::timestamp("fecha_interaccion").default_now()),
        TableDef::new("comentarios", g)
            .column(Column::serial("id_comentario"))
            .column(id_ref("id_usuario"))
            .column(id_ref("id_contenido"))
            .column(Column::integer("id_comentario_padre"))
            .column(Column::text("texto").not_null())
            .column(id_ref("id_estado_general"))
            .column(Column::timestamp("fecha_creacion").default_now())
            .column(Column::timestamp("fecha_actualizacion").default_now()),
    ]
}

fn report_tables() -> Vec<TableDef> {
    vec![TableDef::new("reportes", TableGroup::Reportes)
        .column(Column::serial("id_reporte"))
        .column(id_ref("id_usuario_reportero"))
        .column(Column::integer("id_contenido"))
        .column(Column::integer("id_comentario"))
        .column(id_ref("id_tipo_reporte"))
        .column(id_ref("id_estado_reporte"))
        .column(Column::text("descripcion").not_null())
        .column(Column::timestamp("fecha_reporte").default_now())
        .column(Column::timestamp("fecha_resolucion"))
        .column(Column::integer("id_administrador_resuelve"))
        .column(Column::text("accion_tomada"))]
}

fn follow_tables() -> Vec<TableDef> {
    let g = TableGroup::Seguimiento;
    vec![
        TableDef::new("seguimientos", g)
            .column(Column::serial("id_seguimiento"))
            .column(id_ref("id_usuario_seguidor"))
            .column(id_ref("id_usuario_seguido"))
            .column(Column::boolean("notificaciones_activas").default(DefaultValue::Bool(true)))
            .column(Column::timestamp("fecha_seguimiento").default_now()),
        TableDef::new("favoritos", g)
            .column(Column::serial("id_favorito"))
            .column(id_ref("id_usuario"))
            .column(id_ref("id_contenido"))
            .column(Column::timestamp("fecha_agregado").default_now())
            .column(Column::varchar("carpeta", 100).default(DefaultValue::Text("general"))),
    ]
}

fn history_tables() -> Vec<TableDef> {
    let g = TableGroup::Historial;
    vec![
        TableDef::new("historial_busquedas", g)
            .column(Column::serial("id_busqueda"))
            .column(Column::integer("id_usuario"))
            .column(Column::varchar("termino_busqueda", 255).not_null())
            .column(Column::integer("resultados_encontrados").default(DefaultValue::Int(0)))
            .column(Column::json("filtros_aplicados"))
            .column(Column::timestamp("fecha_busqueda").default_now()),
        TableDef::new("historial_vistas", g)
            .column(Column::serial("id_vista"))
            .column(id_ref("id_usuario"))
            .column(id_ref("id_contenido"))
            .column(Column::integer("tiempo_reproduccion_segundos").default(DefaultValue::Int(0)))
            .column(Column::integer("porcentaje_visto").default(DefaultValue::Int(0)))
            .column(Column::timestamp("fecha_vista").default_now()),
    ]
}

fn role_config_tables() -> Vec<TableDef> {
    let g = TableGroup::RolesConfiguracion;
    vec![
        TableDef::new("roles_sistema", g)
            .column(Column::serial("id_rol"))
            .column(Column::varchar("codigo_rol", 50).unique().not_null())
            .column(Column::varchar("nombre_rol", 100).not_null())
            .column(descripcion())
            .column(Column::json("permisos").not_null())
            .column(Column::timestamp("fecha_creacion").default_now()),
        TableDef::new("usuario_roles", g)
            .column(Column::serial("id_usuario_rol"))
            .column(id_ref("id_usuario"))
            .column(id_ref("id_rol"))
            .column(Column::timestamp("fecha_asignacion").default_now())
            .column(Column::integer("id_administrador_asigna")),
        TableDef::new("configuracion_sistema", g)
            .column(Column::serial("id_configuracion"))
            .column(Column::varchar("clave", 100).unique().not_null())
            .column(Column::json("valor").not_null())
            .column(Column::varchar("tipo_dato", 50).not_null())
            .column(descripcion())
            .column(Column::boolean("es_editable").default(DefaultValue::Bool(true)))
            .column(Column::varchar("categoria", 50).default(DefaultValue::Text("general")))
            .column(Column::timestamp("fecha_creacion").default_now())
            .column(Column::timestamp("fecha_actualizacion").default_now()),
    ]
}

fn log_notification_tables() -> Vec<TableDef> {
    let g = TableGroup::LogsNotificaciones;
    vec![
        TableDef::new("logs_sistema", g)
            .column(Column::serial("id_log"))
            .column(id_ref("id_nivel_log"))
            .column(Column::varchar("modulo", 100).not_null())
            .column(Column::text("mensaje").not_null())
            .column(Column::json("metadata"))
            .column(Column::integer("id_usuario"))
            .column(Column::varchar("ip_address", 45))
            .column(Column::text("user_agent"))
            .column(Column::timestamp("fecha_log").default_now()),
        TableDef::new("notificaciones", g)
            .column(Column::serial("id_notificacion"))
            .column(id_ref("id_usuario_destino"))
            .column(id_ref("id_tipo_notificacion"))
            .column(Column::varchar("titulo", 255).not_null())
            .column(Column::text("mensaje").not_null())
            .column(Column::varchar("enlace_accion", 500))
            .column(Column::boolean("leida").default(DefaultValue::Bool(false)))
            .column(Column::timestamp("fecha_creacion").default_now())
            .column(Column::timestamp("fecha_lectura")),
    ]
}

fn session_faq_tables() -> Vec<TableDef> {
    let g = TableGroup::SesionesFaq;
    vec![
        TableDef::new("sesiones_activas", g)
            .column(Column::serial("id_sesion"))
            .column(id_ref("id_usuario"))
            .column(Column::varchar("token_sesion", 500).unique().not_null())
            .column(Column::varchar("dispositivo", 255))
            .column(Column::varchar("sistema_operativo", 100))
            .column(Column::varchar("navegador", 100))
            .column(Column::varchar("ip_address", 45))
            .column(Column::timestamp("fecha_inicio").default_now())
            .column(Column::timestamp("fecha_ultima_actividad").default_now())
            .column(Column::timestamp("fecha_expiracion").not_null())
            .column(id_ref("id_estado_general")),
        TableDef::new("faq_categorias", g)
            .column(Column::serial("id_faq_categoria"))
            .column(Column::varchar("nombre", 100).not_null())
            .column(descripcion())
            .column(Column::integer("orden").default(DefaultValue::Int(0)))
            .column(id_ref("id_estado_general")),
        TableDef::new("preguntas_frecuentes", g)
            .column(Column::serial("id_faq"))
            .column(id_ref("id_faq_categoria"))
            .column(Column::text("pregunta").not_null())
            .column(Column::text("respuesta").not_null())
            .column(Column::integer("orden").default(DefaultValue::Int(0)))
            .column(id_ref("id_estado_general"))
            .column(Column::timestamp("fecha_creacion").default_now())
            .column(Column::timestamp("fecha_actualizacion").default_now()),
    ]
}

/// Las 39 tablas de la plataforma agrupadas por fase de creación.
pub fn platform_tables() -> Vec<TableDef> {
    let mut tables = reference_tables();
    tables.extend(user_tables());
    tables.extend(profile_tables());
    tables.extend(preference_tables());
    tables.extend(category_course_tables());
    tables.extend(content_tables());
    tables.extend(interaction_tables());
    tables.extend(report_tables());
    tables.extend(follow_tables());
    tables.extend(history_tables());
    tables.extend(role_config_tables());
    tables.extend(log_notification_tables());
    tables.extend(session_faq_tables());
    tables
}

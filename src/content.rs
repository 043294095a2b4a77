//! Static page copy and the numbers the animations run against.

pub const TYPING_PHRASES: &[&str] = &[
    "Desarrollador Web",
    "Docente Informático",
    "Especialista en HTML5 CSS3 y JavaScript",
    "Experto en PHP y MySQL",
    "Desarrollador de Aplicaciones Web",
    "Formador Tecnológico",
];

/// Document order of the page sections; keyboard navigation walks it.
pub const SECTION_ORDER: &[&str] = &[
    "home",
    "about",
    "skills",
    "ai-expertise",
    "projects",
    "certifications",
    "contact",
];

pub const INITIAL_SECTION: &str = "home";

#[derive(Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub id: &'static str,
    pub label: &'static str,
}

pub const NAV_ENTRIES: &[NavEntry] = &[
    NavEntry { id: "home", label: "Inicio" },
    NavEntry { id: "about", label: "Sobre mí" },
    NavEntry { id: "skills", label: "Habilidades" },
    NavEntry { id: "ai-expertise", label: "IA & Automatización" },
    NavEntry { id: "projects", label: "Proyectos" },
    NavEntry { id: "certifications", label: "Certificaciones" },
    NavEntry { id: "contact", label: "Contacto" },
];

#[derive(Debug, PartialEq, Eq)]
pub struct Stat {
    pub target: u32,
    pub label: &'static str,
}

pub const ABOUT_STATS: &[Stat] = &[
    Stat { target: 15, label: "Años de experiencia" },
    Stat { target: 120, label: "Proyectos completados" },
    Stat { target: 2000, label: "Alumnos formados" },
];

pub const AI_STATS: &[Stat] = &[
    Stat { target: 40, label: "Flujos automatizados" },
    Stat { target: 12, label: "Modelos integrados" },
    Stat { target: 95, label: "Tareas repetitivas eliminadas" },
];

#[derive(Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub percent: u8,
}

pub const SKILLS: &[Skill] = &[
    Skill { name: "HTML5 & CSS3", percent: 95 },
    Skill { name: "JavaScript", percent: 90 },
    Skill { name: "PHP", percent: 88 },
    Skill { name: "MySQL", percent: 85 },
    Skill { name: "WordPress", percent: 80 },
    Skill { name: "Docencia técnica", percent: 98 },
];

#[derive(Debug, PartialEq, Eq)]
pub struct AiCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub technologies: &'static [&'static str],
}

pub const AI_CARDS: &[AiCard] = &[
    AiCard {
        icon: "🤖",
        title: "Asistentes conversacionales",
        technologies: &["OpenAI API", "Prompt engineering", "RAG sobre documentación"],
    },
    AiCard {
        icon: "⚙️",
        title: "Automatización de procesos",
        technologies: &["n8n", "Make", "Webhooks y APIs REST"],
    },
    AiCard {
        icon: "📊",
        title: "Análisis de datos",
        technologies: &["Python", "Pandas", "Paneles en Looker Studio"],
    },
];

pub const AI_SPECIALIZATIONS: &[&str] = &[
    "Chatbots educativos",
    "Generación de contenidos",
    "Clasificación de correo",
    "Integraciones sin código",
];

#[derive(Debug, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub tags: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Campus virtual",
        description: "Plataforma de cursos con seguimiento de alumnos y evaluaciones.",
        image: "/img/projects/campus.webp",
        tags: &["PHP", "MySQL", "JavaScript"],
    },
    Project {
        title: "Gestor de reservas",
        description: "Reservas online para academias con avisos por email.",
        image: "/img/projects/reservas.webp",
        tags: &["PHP", "AJAX", "CSS3"],
    },
    Project {
        title: "Portal docente",
        description: "Recursos y materiales para el aula organizados por nivel.",
        image: "/img/projects/docente.webp",
        tags: &["WordPress", "HTML5"],
    },
];

#[derive(Debug, PartialEq, Eq)]
pub struct Certification {
    pub title: &'static str,
    pub issuer: &'static str,
    pub year: u16,
}

pub const CERTIFICATIONS: &[Certification] = &[
    Certification { title: "Desarrollo de Aplicaciones Web", issuer: "Ministerio de Educación", year: 2012 },
    Certification { title: "Formador de Formadores", issuer: "SEPE", year: 2015 },
    Certification { title: "Automatización con IA", issuer: "Formación continua", year: 2024 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_one_nav_entry_in_the_same_order() {
        let nav_ids: Vec<&str> = NAV_ENTRIES.iter().map(|entry| entry.id).collect();
        assert_eq!(nav_ids, SECTION_ORDER);
    }

    #[test]
    fn ai_entry_sits_right_before_projects() {
        let ai = SECTION_ORDER.iter().position(|id| *id == "ai-expertise");
        let projects = SECTION_ORDER.iter().position(|id| *id == "projects");
        assert_eq!(ai.map(|index| index + 1), projects);
    }

    #[test]
    fn skill_widths_are_percentages() {
        assert!(SKILLS.iter().all(|skill| skill.percent <= 100));
    }

    #[test]
    fn initial_section_is_part_of_the_order() {
        assert!(SECTION_ORDER.contains(&INITIAL_SECTION));
        assert!(!TYPING_PHRASES.is_empty());
    }
}

//! Fixed word lists used by the heuristic extractor.

/// Resume sections the heuristic extractor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Preamble,
    Experience,
    Education,
    Skills,
    Other,
}

/// Known section headers, lower-cased, without trailing colon.
pub const SECTION_HEADERS: &[(&str, Section)] = &[
    ("experience", Section::Experience),
    ("work experience", Section::Experience),
    ("professional experience", Section::Experience),
    ("employment history", Section::Experience),
    ("employment", Section::Experience),
    ("work history", Section::Experience),
    ("internships", Section::Experience),
    ("internship", Section::Experience),
    ("education", Section::Education),
    ("academic background", Section::Education),
    ("academics", Section::Education),
    ("qualifications", Section::Education),
    ("educational qualifications", Section::Education),
    ("skills", Section::Skills),
    ("technical skills", Section::Skills),
    ("key skills", Section::Skills),
    ("core competencies", Section::Skills),
    ("projects", Section::Other),
    ("certifications", Section::Other),
    ("summary", Section::Other),
    ("objective", Section::Other),
    ("profile", Section::Other),
    ("achievements", Section::Other),
    ("awards", Section::Other),
    ("interests", Section::Other),
    ("hobbies", Section::Other),
    ("languages", Section::Other),
    ("publications", Section::Other),
    ("references", Section::Other),
    ("personal details", Section::Other),
];

/// Skills recognised in resume text, in their display form. Matching is
/// case-insensitive on whole phrases.
pub const SKILLS: &[&str] = &[
    // languages
    "Python",
    "Java",
    "JavaScript",
    "JS",
    "TypeScript",
    "C++",
    "C#",
    "Rust",
    "Golang",
    "Kotlin",
    "Swift",
    "Objective-C",
    "Ruby",
    "PHP",
    "Scala",
    "Dart",
    "SQL",
    // data stores
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "SQLite",
    "Redis",
    // web
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Flask",
    "Spring Boot",
    "REST",
    "GraphQL",
    // mobile
    "Android",
    "iOS",
    "Flutter",
    "Xcode",
    // data science
    "Machine Learning",
    "Deep Learning",
    "Data Science",
    "Data Analysis",
    "AI",
    "ML",
    "NLP",
    "Computer Vision",
    "TensorFlow",
    "PyTorch",
    "Keras",
    "Scikit-learn",
    "Pandas",
    "NumPy",
    "Tableau",
    "Power BI",
    "Excel",
    "Statistics",
    // design
    "UI",
    "UX",
    "Figma",
    "Adobe XD",
    "Photoshop",
    "Illustrator",
    "Wireframing",
    "Prototyping",
    // tooling
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Linux",
    "Git",
    "Jenkins",
    "Agile",
    "Scrum",
];

pub fn section_for_header(line: &str) -> Option<Section> {
    let key = line.trim().trim_end_matches(':').trim().to_lowercase();
    SECTION_HEADERS
        .iter()
        .find(|(header, _)| *header == key)
        .map(|(_, section)| *section)
}

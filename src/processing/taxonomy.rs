//! Skill taxonomy: predefined role profiles and the skill vocabulary

use crate::error::{Result, ResumeScorerError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use strsim::jaro_winkler;

/// Normalized description of a target role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobProfile {
    pub description: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub keywords: Vec<String>,
}

impl JobProfile {
    pub fn is_empty(&self) -> bool {
        self.required_skills.is_empty() && self.preferred_skills.is_empty() && self.keywords.is_empty()
    }
}

/// One named entry of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl RoleProfile {
    pub fn to_profile(&self) -> JobProfile {
        JobProfile {
            description: self.description.clone(),
            required_skills: self.required_skills.clone(),
            preferred_skills: self.preferred_skills.clone(),
            keywords: self.keywords.clone(),
        }
    }
}

/// Read-only catalog of roles plus the soft skills recognised in resumes.
///
/// Built once at startup and shared by reference; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    roles: Vec<RoleProfile>,
    #[serde(default = "default_soft_skills")]
    soft_skills: Vec<String>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SkillTaxonomy {
    /// Minimum Jaro-Winkler similarity for a "did you mean" role suggestion
    const ROLE_SUGGESTION_THRESHOLD: f64 = 0.8;

    pub fn builtin() -> Self {
        Self {
            roles: builtin_roles(),
            soft_skills: default_soft_skills(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let taxonomy: SkillTaxonomy = toml::from_str(content)
            .map_err(|e| ResumeScorerError::Taxonomy(format!("Failed to parse taxonomy: {}", e)))?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded taxonomy with {} roles from {}",
            taxonomy.roles.len(),
            path.display()
        );
        Ok(taxonomy)
    }

    fn validate(&self) -> Result<()> {
        if self.roles.is_empty() {
            return Err(ResumeScorerError::Taxonomy("Taxonomy defines no roles".to_string()));
        }

        let mut seen = HashSet::new();
        for role in &self.roles {
            let name = role.name.trim();
            if name.is_empty() {
                return Err(ResumeScorerError::Taxonomy("Role name must not be empty".to_string()));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(ResumeScorerError::Taxonomy(format!("Duplicate role: {}", name)));
            }

            let mut entries = role.required_skills.iter().chain(&role.preferred_skills).chain(&role.keywords);
            if entries.any(|entry| entry.trim().is_empty()) {
                return Err(ResumeScorerError::Taxonomy(format!(
                    "Role '{}' has a blank skill or keyword",
                    name
                )));
            }
        }

        if self.soft_skills.iter().any(|skill| skill.trim().is_empty()) {
            return Err(ResumeScorerError::Taxonomy("Soft skills must not be blank".to_string()));
        }

        Ok(())
    }

    pub fn roles(&self) -> &[RoleProfile] {
        &self.roles
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }

    /// Exact, case-sensitive role lookup.
    pub fn role(&self, name: &str) -> Option<&RoleProfile> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Closest role name for a misspelled or differently-cased query.
    pub fn closest_role(&self, query: &str) -> Option<&str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.roles
            .iter()
            .map(|r| (r.name.as_str(), jaro_winkler(&query, &r.name.to_lowercase())))
            .filter(|(_, score)| *score >= Self::ROLE_SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| name)
    }

    pub fn soft_skills(&self) -> &[String] {
        &self.soft_skills
    }

    /// Required and preferred skills of every role, deduplicated case-insensitively.
    ///
    /// Order is catalog declaration order: roles in order, required before
    /// preferred, list order within each. The first spelling seen is kept.
    pub fn vocabulary(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.roles
            .iter()
            .flat_map(|r| r.required_skills.iter().chain(r.preferred_skills.iter()))
            .filter(|skill| !skill.trim().is_empty())
            .filter(|skill| seen.insert(skill.to_lowercase()))
            .cloned()
            .collect()
    }

    /// Vocabulary followed by soft skills not already in it.
    pub fn resume_skill_vocabulary(&self) -> Vec<String> {
        let mut skills = self.vocabulary();
        let mut seen: HashSet<String> = skills.iter().map(|s| s.to_lowercase()).collect();
        for skill in &self.soft_skills {
            if seen.insert(skill.to_lowercase()) {
                skills.push(skill.clone());
            }
        }
        skills
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_soft_skills() -> Vec<String> {
    strings(&[
        "Leadership", "Communication", "Problem Solving", "Team Work",
        "Project Management", "Time Management", "Critical Thinking",
        "Analytical Skills", "Creativity", "Adaptability", "Customer Service",
        "Sales", "Negotiation", "Presentation", "Writing", "Research",
    ])
}

fn builtin_roles() -> Vec<RoleProfile> {
    vec![
        RoleProfile {
            name: "Software Engineer".to_string(),
            description: "Develop and maintain software applications using various programming languages and frameworks".to_string(),
            required_skills: strings(&[
                "Python", "Java", "JavaScript", "C++", "Git", "SQL", "HTML", "CSS",
                "React", "Node.js", "API Development", "Database Design", "Testing",
                "Debugging", "Agile", "Problem Solving", "Team Collaboration",
            ]),
            preferred_skills: strings(&[
                "Docker", "Kubernetes", "AWS", "Machine Learning", "DevOps",
                "Microservices", "GraphQL", "TypeScript", "MongoDB", "Redis",
            ]),
            keywords: strings(&[
                "software development", "programming", "coding", "algorithms",
                "data structures", "version control", "code review", "deployment",
                "scalability", "performance optimization", "software architecture",
            ]),
        },
        RoleProfile {
            name: "Data Scientist".to_string(),
            description: "Analyze complex data to extract insights and build predictive models".to_string(),
            required_skills: strings(&[
                "Python", "R", "SQL", "Machine Learning", "Statistics", "Pandas",
                "NumPy", "Scikit-learn", "Data Visualization", "Jupyter", "Excel",
                "Problem Solving", "Critical Thinking", "Communication",
            ]),
            preferred_skills: strings(&[
                "TensorFlow", "PyTorch", "Deep Learning", "NLP", "Big Data",
                "Spark", "Hadoop", "Tableau", "Power BI", "A/B Testing",
                "Feature Engineering", "Model Deployment", "Cloud Platforms",
            ]),
            keywords: strings(&[
                "data analysis", "predictive modeling", "statistical analysis",
                "data mining", "business intelligence", "data pipeline",
                "feature selection", "model validation", "data cleaning",
            ]),
        },
        RoleProfile {
            name: "Product Manager".to_string(),
            description: "Lead product development from conception to launch".to_string(),
            required_skills: strings(&[
                "Product Strategy", "Market Research", "User Experience", "Analytics",
                "Project Management", "Communication", "Leadership", "Stakeholder Management",
                "Agile", "Scrum", "Data Analysis", "Problem Solving",
            ]),
            preferred_skills: strings(&[
                "SQL", "A/B Testing", "Wireframing", "Prototyping", "Customer Development",
                "Go-to-Market Strategy", "Pricing Strategy", "Competitive Analysis",
                "Product Marketing", "Technical Writing",
            ]),
            keywords: strings(&[
                "product roadmap", "user stories", "market analysis", "product launch",
                "customer feedback", "product metrics", "cross-functional teams",
                "product vision", "requirements gathering", "product lifecycle",
            ]),
        },
        RoleProfile {
            name: "Marketing Manager".to_string(),
            description: "Develop and execute marketing strategies to promote products and services".to_string(),
            required_skills: strings(&[
                "Digital Marketing", "Content Marketing", "Social Media", "SEO", "SEM",
                "Email Marketing", "Analytics", "Campaign Management", "Brand Management",
                "Communication", "Creativity", "Project Management",
            ]),
            preferred_skills: strings(&[
                "Google Analytics", "Facebook Ads", "Google Ads", "Marketing Automation",
                "CRM", "A/B Testing", "Conversion Optimization", "Influencer Marketing",
                "Video Marketing", "Graphic Design", "Copywriting",
            ]),
            keywords: strings(&[
                "marketing campaigns", "lead generation", "brand awareness",
                "customer acquisition", "marketing ROI", "content strategy",
                "market segmentation", "customer journey", "marketing funnel",
            ]),
        },
        RoleProfile {
            name: "Business Analyst".to_string(),
            description: "Analyze business processes and requirements to improve efficiency".to_string(),
            required_skills: strings(&[
                "Business Analysis", "Requirements Gathering", "Process Mapping",
                "Data Analysis", "SQL", "Excel", "Documentation", "Stakeholder Management",
                "Problem Solving", "Communication", "Critical Thinking",
            ]),
            preferred_skills: strings(&[
                "Tableau", "Power BI", "Python", "R", "JIRA", "Confluence",
                "Process Improvement", "Change Management", "Project Management",
                "Business Intelligence", "Data Modeling",
            ]),
            keywords: strings(&[
                "business requirements", "process optimization", "gap analysis",
                "business case", "stakeholder analysis", "workflow analysis",
                "business metrics", "reporting", "business intelligence",
            ]),
        },
        RoleProfile {
            name: "UI/UX Designer".to_string(),
            description: "Design user interfaces and experiences for digital products".to_string(),
            required_skills: strings(&[
                "UI Design", "UX Design", "Wireframing", "Prototyping", "User Research",
                "Figma", "Sketch", "Adobe Creative Suite", "Design Systems",
                "User Testing", "Information Architecture", "Creativity",
            ]),
            preferred_skills: strings(&[
                "HTML", "CSS", "JavaScript", "Animation", "Interaction Design",
                "Accessibility", "Mobile Design", "Responsive Design", "Design Thinking",
                "Usability Testing", "A/B Testing",
            ]),
            keywords: strings(&[
                "user experience", "user interface", "design thinking", "user journey",
                "design systems", "visual design", "interaction design",
                "usability", "accessibility", "design research",
            ]),
        },
    ]
}

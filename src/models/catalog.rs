// academy-service/src/models/catalog.rs
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseCategory {
    #[serde(rename = "Quran")]
    Quran,
    #[serde(rename = "Arabic")]
    Arabic,
    #[serde(rename = "Islamic Studies")]
    IslamicStudies,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub category: CourseCategory,
    pub image_url: String,
}

impl Course {
    fn new(
        id: &str,
        title: &str,
        description: &str,
        duration: &str,
        category: CourseCategory,
        image_seed: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            duration: duration.to_string(),
            category,
            image_url: format!("https://picsum.photos/seed/{}/800/600", image_seed),
        }
    }
}

lazy_static! {
    // The published course catalog. Static content, immutable at runtime.
    pub static ref COURSES: Vec<Course> = vec![
        Course::new(
            "1",
            "Quran Reading (Noorani Qaida)",
            "Perfect for beginners. Learn the basics of Arabic letters and pronunciation rules.",
            "3 Months",
            CourseCategory::Quran,
            "quran1",
        ),
        Course::new(
            "2",
            "Tajweed Mastery",
            "Learn the intricate rules of Quranic recitation with expert instructors.",
            "6 Months",
            CourseCategory::Quran,
            "quran2",
        ),
        Course::new(
            "3",
            "Hifz (Memorization)",
            "A structured program for those wishing to commit the Holy Quran to memory.",
            "Flexible",
            CourseCategory::Quran,
            "quran3",
        ),
        Course::new(
            "4",
            "Arabic Language Basics",
            "Introduction to modern standard Arabic for daily conversation and understanding.",
            "4 Months",
            CourseCategory::Arabic,
            "arabic",
        ),
        Course::new(
            "5",
            "Islamic Jurisprudence (Fiqh)",
            "Understand the practical application of Islamic laws in everyday life.",
            "5 Months",
            CourseCategory::IslamicStudies,
            "fiqh",
        ),
    ];
}

// Look up a course by its catalog id
pub fn find_course(id: &str) -> Option<&'static Course> {
    COURSES.iter().find(|course| course.id == id)
}

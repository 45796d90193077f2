//! Hard-coded progress data shown on the dashboard and profile views

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Course,
    Project,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Course => "course",
            ItemKind::Project => "project",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapItem {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub progress: u8,
    pub completed: bool,
    pub kind: ItemKind,
    pub duration: &'static str,
    pub resources: &'static [&'static str],
    pub current_module: Option<&'static str>,
}

impl RoadmapItem {
    pub fn action_label(&self) -> &'static str {
        if self.completed {
            "Review Material"
        } else if self.progress > 0 {
            "Continue"
        } else {
            "Start Learning"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    pub days_active: u32,
    pub courses_completed: u32,
    pub current_streak: u32,
}

/// Summary card on the profile view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub courses_completed: u32,
    pub total_courses: u32,
    pub days_active: u32,
    pub badges: &'static [&'static str],
    pub percentage: u8,
}

pub const ROADMAP_TITLE: &str = "Your React Developer Roadmap";

pub const USER_STATS: UserStats = UserStats {
    days_active: 24,
    courses_completed: 1,
    current_streak: 5,
};

pub const PROGRESS_SUMMARY: ProgressSummary = ProgressSummary {
    courses_completed: 4,
    total_courses: 7,
    days_active: 32,
    badges: &["JavaScript Basics", "CSS Master", "React Rookie", "Git Essentials"],
    percentage: 57,
};

pub fn roadmap_items() -> Vec<RoadmapItem> {
    vec![
        RoadmapItem {
            id: 1,
            title: "JavaScript Fundamentals",
            description: "Learn the core concepts of JavaScript including variables, data types, functions, and control flow.",
            progress: 100,
            completed: true,
            kind: ItemKind::Course,
            duration: "2 weeks",
            resources: &["MDN JavaScript Guide", "JavaScript.info"],
            current_module: None,
        },
        RoadmapItem {
            id: 2,
            title: "React Basics",
            description: "Understand React components, JSX, props, and state management.",
            progress: 75,
            completed: false,
            kind: ItemKind::Course,
            duration: "3 weeks",
            resources: &["React Official Docs", "React for Beginners"],
            current_module: Some("Component Lifecycle"),
        },
        RoadmapItem {
            id: 3,
            title: "State Management with Redux",
            description: "Learn how to manage application state using Redux and connect it with React.",
            progress: 20,
            completed: false,
            kind: ItemKind::Course,
            duration: "2 weeks",
            resources: &["Redux Documentation", "Egghead.io Redux Course"],
            current_module: Some("Actions and Reducers"),
        },
        RoadmapItem {
            id: 4,
            title: "Build a Weather App",
            description: "Apply your React and state management knowledge by creating a weather application.",
            progress: 0,
            completed: false,
            kind: ItemKind::Project,
            duration: "1 week",
            resources: &["Weather API Documentation", "React Project Structure Guide"],
            current_module: None,
        },
        RoadmapItem {
            id: 5,
            title: "Advanced React Patterns",
            description: "Master advanced React patterns including hooks, context API, and performance optimization.",
            progress: 0,
            completed: false,
            kind: ItemKind::Course,
            duration: "3 weeks",
            resources: &["Advanced React Patterns", "React Performance Optimization"],
            current_module: None,
        },
    ]
}

/// Dashboard list state: one item expanded at a time
#[derive(Debug, Clone)]
pub struct Dashboard {
    items: Vec<RoadmapItem>,
    expanded: Option<u32>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            items: roadmap_items(),
            expanded: None,
        }
    }
}

impl Dashboard {
    pub fn items(&self) -> &[RoadmapItem] {
        &self.items
    }

    pub fn stats(&self) -> UserStats {
        USER_STATS
    }

    pub fn expanded(&self) -> Option<u32> {
        self.expanded
    }

    /// Expand the item, or collapse it if it is already expanded
    pub fn toggle_expand(&mut self, id: u32) {
        self.expanded = if self.expanded == Some(id) { None } else { Some(id) };
    }

    /// Overall completion across all items, rounded down
    pub fn overall_progress(&self) -> u8 {
        if self.items.is_empty() {
            return 0;
        }
        let total: u32 = self.items.iter().map(|i| i.progress as u32).sum();
        (total / self.items.len() as u32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_expand_one_at_a_time() {
        let mut dashboard = Dashboard::default();
        dashboard.toggle_expand(2);
        assert_eq!(dashboard.expanded(), Some(2));
        dashboard.toggle_expand(3);
        assert_eq!(dashboard.expanded(), Some(3));
        dashboard.toggle_expand(3);
        assert_eq!(dashboard.expanded(), None);
    }

    #[test]
    fn test_action_labels() {
        let items = roadmap_items();
        assert_eq!(items[0].action_label(), "Review Material");
        assert_eq!(items[1].action_label(), "Continue");
        assert_eq!(items[3].action_label(), "Start Learning");
    }

    #[test]
    fn test_overall_progress() {
        // (100 + 75 + 20 + 0 + 0) / 5
        assert_eq!(Dashboard::default().overall_progress(), 39);
    }

    #[test]
    fn test_completed_items_have_full_progress() {
        for item in roadmap_items() {
            if item.completed {
                assert_eq!(item.progress, 100);
                assert!(item.current_module.is_none());
            }
        }
    }
}

//! Canned replies standing in for an AI assistant
//!
//! [`RoadmapResponder`] picks one of three fixed roadmaps by keyword;
//! [`AssistantResponder`] always gives the same demo answer. Both are pure.

pub trait Responder: Send + Sync {
    fn respond(&self, text: &str) -> &'static str;
}

pub const REACT_ROADMAP: &str = "\
Based on your interest in React, here's your personalized roadmap:

1. JavaScript Fundamentals (2 weeks)
   - Variables, data types, functions
   - Arrays, objects, and DOM manipulation
   - ES6+ features (arrow functions, destructuring, etc.)

2. React Basics (3 weeks)
   - Components and JSX
   - Props and state management
   - Hooks (useState, useEffect, useContext)
   - Handling events and forms

3. React Router (1 week)
   - Setting up routes
   - Dynamic routing
   - Protected routes

4. State Management (2 weeks)
   - Context API
   - Redux basics
   - Zustand or Jotai

5. API Integration (2 weeks)
   - Fetch API / Axios
   - React Query / SWR for data fetching
   - Working with REST APIs

6. Build Tools & Deployment (1 week)
   - Vite configuration
   - Build optimization
   - Deployment on Vercel, Netlify, or similar platforms

7. Testing (2 weeks)
   - Jest basics
   - React Testing Library
   - Component testing

8. Advanced Topics (3 weeks)
   - Performance optimization
   - Code splitting
   - Server components";

pub const PYTHON_ROADMAP: &str = "\
Here's your personalized Python development roadmap:

1. Python Fundamentals (3 weeks)
   - Variables, data types, and basic operations
   - Control flow (if statements, loops)
   - Functions and modules
   - Error handling

2. Data Structures & Algorithms (3 weeks)
   - Lists, dictionaries, sets, tuples
   - Basic algorithms and problem-solving
   - Time and space complexity

3. Object-Oriented Programming (2 weeks)
   - Classes and objects
   - Inheritance and polymorphism
   - Encapsulation and abstraction

4. Web Development with Flask/Django (4 weeks)
   - Basics of HTTP and APIs
   - Creating RESTful APIs
   - Database integration
   - Authentication and authorization

5. Data Science Fundamentals (3 weeks)
   - NumPy and Pandas
   - Data visualization with Matplotlib
   - Statistical analysis

6. Machine Learning Basics (4 weeks)
   - Scikit-learn
   - Supervised and unsupervised learning
   - Model evaluation and improvement

7. DevOps for Python (2 weeks)
   - Virtual environments
   - Containerization with Docker
   - CI/CD pipelines

8. Advanced Python (2 weeks)
   - Async programming
   - Performance optimization
   - Design patterns
   - Testing strategies";

pub const GENERAL_ROADMAP: &str = "\
Based on your input, here's a general software development roadmap:

1. Programming Fundamentals (4 weeks)
   - Variables, data types, and operators
   - Control structures (conditionals, loops)
   - Functions and modules
   - Basic algorithms

2. Web Development Basics (3 weeks)
   - HTML & CSS
   - JavaScript essentials
   - DOM manipulation
   - Responsive design

3. Version Control (1 week)
   - Git basics
   - GitHub workflow
   - Branching and merging

4. Choose a Specialization Path:
   - Frontend development (React, Vue, or Angular)
   - Backend development (Node.js, Python, or Java)
   - Mobile development (React Native or Flutter)
   - Data Science (Python, R, SQL)

5. Database Concepts (2 weeks)
   - Relational vs. NoSQL
   - Database design
   - CRUD operations
   - SQL basics

6. API Development (2 weeks)
   - RESTful principles
   - Authentication and authorization
   - API documentation

7. Testing & Debugging (2 weeks)
   - Unit testing
   - Integration testing
   - Debugging techniques

8. DevOps Basics (2 weeks)
   - CI/CD
   - Containerization (Docker)
   - Cloud services (AWS, Azure, or GCP)

To refine this roadmap further, please share your specific interests or career goals.";

pub const ROADMAP_WELCOME: &str = "Welcome to the Roadmap Generator! Tell me about your experience and learning goals, and I'll create a personalized learning roadmap for you.";

pub const ASSISTANT_GREETING: &str =
    "Hi there! I'm your Pathfinder AI assistant. How can I help with your learning journey today?";

pub const ASSISTANT_REPLY: &str = "Thanks for your message! As a demo chatbot, I'm here to show how Pathfinder's AI can assist with your tech learning journey. In the full version, I'd provide personalized guidance based on your skills and goals.";

/// Keywords in priority order; the first one found wins
const ROADMAP_RULES: &[(&str, &str)] = &[("react", REACT_ROADMAP), ("python", PYTHON_ROADMAP)];

#[derive(Debug, Clone, Copy, Default)]
pub struct RoadmapResponder;

impl Responder for RoadmapResponder {
    fn respond(&self, text: &str) -> &'static str {
        let lowered = text.to_lowercase();
        ROADMAP_RULES
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, template)| *template)
            .unwrap_or(GENERAL_ROADMAP)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AssistantResponder;

impl Responder for AssistantResponder {
    fn respond(&self, _text: &str) -> &'static str {
        ASSISTANT_REPLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_react_keyword() {
        assert_eq!(RoadmapResponder.respond("I want to learn react"), REACT_ROADMAP);
    }

    #[test]
    fn test_python_keyword() {
        assert_eq!(RoadmapResponder.respond("teach me python"), PYTHON_ROADMAP);
    }

    #[test]
    fn test_case_insensitive_substring() {
        assert_eq!(RoadmapResponder.respond("REACTive programming?"), REACT_ROADMAP);
        assert_eq!(RoadmapResponder.respond("MicroPython on boards"), PYTHON_ROADMAP);
    }

    #[test]
    fn test_react_takes_priority_over_python() {
        assert_eq!(RoadmapResponder.respond("python backend, react frontend"), REACT_ROADMAP);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(RoadmapResponder.respond("I like Go and Rust"), GENERAL_ROADMAP);
        assert_eq!(RoadmapResponder.respond(""), GENERAL_ROADMAP);
    }

    #[test]
    fn test_deterministic() {
        let first = RoadmapResponder.respond("teach me python");
        for _ in 0..3 {
            assert_eq!(RoadmapResponder.respond("teach me python"), first);
        }
    }

    #[test]
    fn test_assistant_always_same_reply() {
        assert_eq!(AssistantResponder.respond("react"), ASSISTANT_REPLY);
        assert_eq!(AssistantResponder.respond("anything"), ASSISTANT_REPLY);
    }

    #[test]
    fn test_templates_are_multi_line() {
        for template in [REACT_ROADMAP, PYTHON_ROADMAP, GENERAL_ROADMAP] {
            assert!(template.lines().count() > 10);
        }
    }
}

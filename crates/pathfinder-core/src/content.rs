//! Static copy for the landing, use case, plans and not-found views

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub name: &'static str,
    pub price: &'static str,
    pub tagline: &'static str,
    pub features: &'static [&'static str],
    pub call_to_action: &'static str,
    pub recommended: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const LANDING_HEADLINE: &str = "Navigate Your Tech Career with AI-Powered Learning Paths";

pub const LANDING_TAGLINE: &str = "Stop wasting time on outdated resources. Pathfinder creates personalized tech learning roadmaps based on your goals, skills, and the latest industry demands.";

pub const PROBLEM_TITLE: &str = "The Problem with Learning Tech Today";

pub const PROBLEMS: &[Section] = &[
    Section {
        title: "Outdated Learning Paths",
        body: "Existing resources often teach outdated skills that aren't aligned with what employers actually need in 2025.",
    },
    Section {
        title: "Lack of Personalization",
        body: "Generic \"one-size-fits-all\" learning plans ignore your existing skills, learning style, and career goals.",
    },
    Section {
        title: "Wasted Time & Energy",
        body: "Without expert guidance, you waste months on unnecessary tutorials and courses that don't move you toward your goals.",
    },
];

pub const SOLUTION_TITLE: &str = "How Pathfinder Solves This";

pub const SOLUTIONS: &[Section] = &[
    Section {
        title: "Personalized Learning Roadmaps",
        body: "Our AI analyzes your skills, goals, and learning style to create a customized learning path that focuses only on what you need.",
    },
    Section {
        title: "Smart AI Chatbot Assistant",
        body: "Get 24/7 guidance, answer questions, and receive recommendations from our intelligent AI assistant that knows your learning journey.",
    },
    Section {
        title: "Industry-Relevant Skills",
        body: "Stay ahead with learning paths that adapt to industry trends and focus on skills employers are actually hiring for right now.",
    },
    Section {
        title: "Progress Tracking",
        body: "Visualize your learning progress, identify skill gaps, and celebrate milestones on your journey.",
    },
];

pub const LANDING_CLOSING: Section = Section {
    title: "Ready to Find Your Perfect Tech Learning Path?",
    body: "Join thousands of developers who have accelerated their tech careers with Pathfinder's AI-powered learning roadmaps.",
};

pub const USE_CASE_TITLE: &str = "How Pathfinder Works";

pub const USE_CASE_INTRO: &str =
    "Follow Alex's journey to becoming a full-stack developer with Pathfinder's AI-powered guidance.";

pub const USE_CASE_STEPS: &[Section] = &[
    Section {
        title: "Creating an Account",
        body: "Alex signs up and creates a Pathfinder account in less than a minute.",
    },
    Section {
        title: "Profile Setup",
        body: "Alex shares their current skills, learning preferences, and career goals.",
    },
    Section {
        title: "AI Analysis",
        body: "Our AI analyzes Alex's skills and goals to create a personalized learning roadmap.",
    },
    Section {
        title: "Personalized Dashboard",
        body: "Alex receives a custom roadmap showing exactly what to learn and in what order.",
    },
    Section {
        title: "AI Assistant Support",
        body: "Alex gets stuck and asks the Pathfinder AI chatbot for help with a React concept.",
    },
];

pub const USE_CASE_CLOSING: &str = "Ready to Start Your Journey?";

pub const PLANS_TITLE: &str = "Choose Your Learning Journey";

pub const PLANS_INTRO: &str =
    "Unlock your full potential with a Pathfinder subscription plan that fits your needs and goals.";

pub const PLANS: &[Plan] = &[
    Plan {
        name: "Freemium",
        price: "$0",
        tagline: "Get started with personalized roadmaps",
        features: &[
            "Personalized learning roadmaps",
            "Basic skills assessment",
            "Course recommendations",
            "Limited AI chatbot assistance (10 queries/day)",
            "Progress tracking",
        ],
        call_to_action: "Get Started",
        recommended: false,
    },
    Plan {
        name: "Premium",
        price: "$19",
        tagline: "Enhanced learning with personal mentorship",
        features: &[
            "Everything in Freemium",
            "Unlimited AI chatbot assistance",
            "Monthly 1-on-1 mentorship session (30 min)",
            "Advanced learning analytics",
            "Priority content updates",
            "Customizable learning pace",
            "Resume review & career guidance",
        ],
        call_to_action: "Upgrade Now",
        recommended: true,
    },
];

pub const FAQS: &[Faq] = &[
    Faq {
        question: "Can I switch between plans?",
        answer: "Yes, you can upgrade or downgrade your plan at any time. Changes will be effective from your next billing cycle.",
    },
    Faq {
        question: "What payment methods do you accept?",
        answer: "We accept all major credit cards, PayPal, and select regional payment methods.",
    },
    Faq {
        question: "Can I cancel my subscription?",
        answer: "Yes, you can cancel your subscription at any time from your account settings. You'll continue to have access until the end of your current billing period.",
    },
    Faq {
        question: "What's included in the mentorship sessions?",
        answer: "Mentorship sessions are 1-on-1 video calls with experienced developers who can review your code, answer questions, and provide career guidance.",
    },
];

pub const NOT_FOUND_TITLE: &str = "Page Not Found";

pub const NOT_FOUND_BODY: &str = "The page you are looking for doesn't exist or has been moved.";

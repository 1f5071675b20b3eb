//! Frontend / backend suitability scoring.
//!
//! Algorithm:
//! 1. +10 per skill found in the frontend set, +10 per skill found in the backend set.
//!    The sets overlap on full-stack terms, so one skill can feed both scores.
//! 2. + seniority bonus on both scores.
//! 3. Clamp each score to [0, 100].

use serde::{Deserialize, Serialize};

use crate::models::candidate::Seniority;
use crate::skills::skill_key;

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;
const SKILL_POINTS: i32 = 10;

const FULL_STACK_SKILLS: &[&str] = &["full-stack", "fullstack", "full stack"];

const FRONTEND_SKILLS: &[&str] = &[
    "react",
    "react.js",
    "reactjs",
    "angular",
    "angularjs",
    "vue",
    "vue.js",
    "vuejs",
    "javascript",
    "typescript",
    "html",
    "html5",
    "css",
    "css3",
    "frontend",
    "front-end",
    "ui",
    "ux",
    "ui/ux",
    "responsive",
    "bootstrap",
    "sass",
    "webpack",
    "babel",
    "npm",
    "yarn",
    "redux",
    "mobx",
    "jquery",
    "next.js",
    "nuxt.js",
    "svelte",
    "ember",
    "backbone",
    "material-ui",
    "tailwind",
    "tailwind css",
    "figma",
];

const BACKEND_SKILLS: &[&str] = &[
    "python",
    "django",
    "flask",
    "fastapi",
    "node.js",
    "nodejs",
    "node",
    "express",
    "express.js",
    "java",
    "spring",
    "spring boot",
    "c#",
    ".net",
    "ruby",
    "rails",
    "ruby on rails",
    "php",
    "laravel",
    "go",
    "golang",
    "rust",
    "backend",
    "back-end",
    "api",
    "rest",
    "rest api",
    "graphql",
    "grpc",
    "database",
    "sql",
    "mongodb",
    "postgresql",
    "postgres",
    "mysql",
    "redis",
    "elasticsearch",
    "microservices",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "serverless",
    "kafka",
    "rabbitmq",
    "nginx",
    "apache",
];

/// Derived suitability scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub fe_score: i32,
    pub be_score: i32,
}

pub fn seniority_bonus(seniority: Seniority) -> i32 {
    match seniority {
        Seniority::Junior => 5,
        Seniority::Mid => 10,
        Seniority::Senior => 20,
        Seniority::Lead | Seniority::Principal => 30,
    }
}

pub fn is_frontend_skill(skill: &str) -> bool {
    in_set(FRONTEND_SKILLS, skill)
}

pub fn is_backend_skill(skill: &str) -> bool {
    in_set(BACKEND_SKILLS, skill)
}

fn in_set(set: &[&str], skill: &str) -> bool {
    let key = skill_key(skill);
    FULL_STACK_SKILLS.contains(&key.as_str()) || set.contains(&key.as_str())
}

pub fn score<S: AsRef<str>>(skills: &[S], seniority: Seniority) -> Scores {
    let bonus = seniority_bonus(seniority);
    let mut fe_score = bonus;
    let mut be_score = bonus;

    for skill in skills {
        let skill = skill.as_ref();
        if is_frontend_skill(skill) {
            fe_score = fe_score.saturating_add(SKILL_POINTS);
        }
        if is_backend_skill(skill) {
            be_score = be_score.saturating_add(SKILL_POINTS);
        }
    }

    Scores {
        fe_score: fe_score.clamp(MIN_SCORE, MAX_SCORE),
        be_score: be_score.clamp(MIN_SCORE, MAX_SCORE),
    }
}

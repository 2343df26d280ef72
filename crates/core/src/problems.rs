//! Problem Bank
//!
//! A static catalog of interview problems partitioned by interview type.
//! Pure with respect to the catalog; `pick` is the only source of
//! randomness in the whole session path, and it runs before prompt
//! composition.

use crate::session::InterviewType;
use rand::seq::IndexedRandom;

/// One entry in the problem bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub name: &'static str,
    pub content: &'static str,
}

/// Sentinel returned when a category's catalog is empty.
const GENERAL_DISCUSSION: Problem = Problem {
    name: "General Discussion",
    content: "Let's have a general discussion.",
};

const SYSTEM_DESIGN_PROBLEMS: &[Problem] = &[
    Problem {
        name: "ML Model Serving Platform",
        content: "\
Design a scalable machine learning model serving platform that can:
- Handle multiple ML models with different frameworks (TensorFlow, PyTorch, scikit-learn)
- Support real-time predictions with low latency (<100ms)
- Scale to handle 10,000 requests per second
- Support A/B testing and gradual rollouts
- Include monitoring and alerting for model performance

Consider: load balancing, caching, model versioning, and rollback strategies.",
    },
    Problem {
        name: "Recommendation System",
        content: "\
Design a recommendation system for a streaming platform (like Netflix/Spotify) that:
- Provides personalized recommendations for millions of users
- Updates in near real-time based on user interactions
- Handles cold-start problem for new users and new content
- Balances between exploitation (showing what users like) and exploration (discovering new preferences)
- Can explain why items are recommended

Consider: collaborative filtering, content-based filtering, and hybrid approaches.",
    },
    Problem {
        name: "Fraud Detection Pipeline",
        content: "\
Design a real-time fraud detection system for a payment platform that:
- Processes millions of transactions per day
- Detects fraudulent transactions in real-time (<500ms)
- Minimizes false positives while catching most fraud
- Adapts to new fraud patterns over time
- Provides explainable decisions for compliance

Consider: feature engineering, model retraining, feedback loops, and handling imbalanced data.",
    },
    Problem {
        name: "Search Ranking System",
        content: "\
Design a search ranking system for an e-commerce platform that:
- Returns relevant results within 200ms
- Incorporates multiple signals (text relevance, popularity, personalization)
- Handles queries with typos and synonyms
- Supports real-time inventory updates
- Enables easy experimentation with ranking algorithms

Consider: indexing strategies, learning to rank, and online/offline evaluation.",
    },
];

const LIVE_CODING_PROBLEMS: &[Problem] = &[
    Problem {
        name: "Implement K-Means Clustering",
        content: "\
Implement the K-Means clustering algorithm from scratch.

Your implementation should:
1. Initialize k centroids randomly from the data points
2. Assign each point to the nearest centroid
3. Update centroids as the mean of assigned points
4. Repeat until convergence or max iterations

Input: List of data points, number of clusters k
Output: Cluster assignments and final centroids",
    },
    Problem {
        name: "Feature Preprocessing Pipeline",
        content: "\
Implement a feature preprocessing pipeline that handles:

1. Missing value imputation (mean for numeric, mode for categorical)
2. Categorical encoding (one-hot encoding)
3. Numerical scaling (standardization)

Your pipeline should:
- Learn parameters from training data (fit)
- Apply transformations to new data (transform)
- Handle both numeric and categorical features

Write clean, modular code that could be used in production.",
    },
    Problem {
        name: "Binary Classification Metrics",
        content: "\
Implement functions to calculate common binary classification metrics:

1. Accuracy
2. Precision
3. Recall
4. F1 Score
5. ROC-AUC (given predictions and probabilities)

Also implement a function that finds the optimal threshold for a given metric.

Input: y_true (actual labels), y_pred (predicted labels), y_prob (predicted probabilities)
Output: Dictionary of all metrics",
    },
    Problem {
        name: "Gradient Descent Optimizer",
        content: "\
Implement gradient descent optimization for linear regression.

Your implementation should:
1. Initialize weights randomly
2. Compute gradients of MSE loss
3. Update weights using gradient descent
4. Support batch, mini-batch, and stochastic modes
5. Track loss history for visualization

Bonus: Implement momentum or Adam optimizer variant.",
    },
];

const ML_THEORY_QUESTIONS: &[Problem] = &[
    Problem {
        name: "Bias-Variance Tradeoff",
        content: "\
Let's discuss the bias-variance tradeoff in machine learning.

Topics to explore:
- What is bias and variance in the context of ML models?
- How does model complexity affect each?
- What is the relationship to overfitting and underfitting?
- How do regularization techniques address this tradeoff?
- Can you give examples of high-bias vs high-variance models?",
    },
    Problem {
        name: "Transformer Architecture",
        content: "\
Let's dive deep into the Transformer architecture.

Topics to explore:
- What problem does self-attention solve that RNNs couldn't?
- Explain the scaled dot-product attention mechanism
- What are query, key, and value in attention?
- Why do we need positional encoding?
- How does multi-head attention work and why is it useful?
- What is the computational complexity of self-attention?",
    },
    Problem {
        name: "Gradient Problems in Deep Learning",
        content: "\
Let's discuss gradient-related problems in deep neural networks.

Topics to explore:
- What causes vanishing and exploding gradients?
- How do different activation functions affect gradient flow?
- What techniques help mitigate these issues?
- Explain batch normalization and why it helps
- How do skip connections in ResNet address gradient problems?
- What is gradient clipping and when would you use it?",
    },
    Problem {
        name: "Loss Functions and Optimization",
        content: "\
Let's explore loss functions and optimization in deep learning.

Topics to explore:
- Compare MSE vs Cross-Entropy loss - when to use each?
- What is the problem with using accuracy as a loss function?
- Explain the intuition behind Adam optimizer
- What is learning rate scheduling and why is it important?
- How does batch size affect optimization?
- What is the difference between local and global minima?",
    },
];

const COACHING_TOPICS: &[Problem] = &[
    Problem {
        name: "Interview Preparation Strategy",
        content: "General interview preparation coaching. Help the candidate develop a study plan, practice strategy, and build confidence for their upcoming ML/AI interviews.",
    },
    Problem {
        name: "Behavioral Interview Prep",
        content: "Behavioral interview coaching. Help the candidate structure their experiences using STAR format, identify impactful projects to discuss, and practice answering common behavioral questions.",
    },
    Problem {
        name: "Technical Communication",
        content: "Help the candidate improve how they communicate technical concepts. Practice explaining complex ML topics clearly, structuring system design explanations, and thinking out loud during coding.",
    },
    Problem {
        name: "Career Discussion",
        content: "Career coaching session. Discuss career goals, evaluate job opportunities, prepare for salary negotiations, or plan professional development in ML/AI.",
    },
];

/// All catalog entries for an interview type.
pub fn all(interview_type: InterviewType) -> &'static [Problem] {
    match interview_type {
        InterviewType::SystemDesign => SYSTEM_DESIGN_PROBLEMS,
        InterviewType::LiveCoding => LIVE_CODING_PROBLEMS,
        InterviewType::MlTheory => ML_THEORY_QUESTIONS,
        InterviewType::Coaching => COACHING_TOPICS,
    }
}

/// A uniformly random entry for the interview type, or the generic
/// sentinel when the catalog is empty.
pub fn pick(interview_type: InterviewType) -> Problem {
    pick_from(all(interview_type))
}

fn pick_from(catalog: &[Problem]) -> Problem {
    catalog
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(GENERAL_DISCUSSION)
}

/// Case-insensitive exact-name lookup.
pub fn by_name(interview_type: InterviewType, name: &str) -> Option<Problem> {
    all(interview_type)
        .iter()
        .find(|problem| problem.name.eq_ignore_ascii_case(name))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_catalog_is_populated() {
        for interview_type in InterviewType::ALL {
            assert!(!all(interview_type).is_empty(), "{interview_type} catalog");
        }
    }

    #[test]
    fn test_pick_returns_catalog_entry() {
        for interview_type in InterviewType::ALL {
            let problem = pick(interview_type);
            assert!(all(interview_type).contains(&problem));
        }
    }

    #[test]
    fn test_pick_from_empty_catalog_yields_sentinel() {
        let problem = pick_from(&[]);
        assert_eq!(problem.name, "General Discussion");
    }

    #[test]
    fn test_by_name_is_case_insensitive() {
        let problem = by_name(InterviewType::MlTheory, "bias-variance tradeoff")
            .expect("lookup should succeed");
        assert_eq!(problem.name, "Bias-Variance Tradeoff");
    }

    #[test]
    fn test_by_name_requires_exact_match() {
        assert!(by_name(InterviewType::MlTheory, "Bias-Variance").is_none());
        assert!(by_name(InterviewType::Coaching, "Transformer Architecture").is_none());
    }
}

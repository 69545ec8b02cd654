//! Educational content library for the Learn tab.
//!
//! Static article data; the frontend renders it. Lookup is by slug.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSection {
    pub heading: Option<String>,
    pub body: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub sections: Vec<ArticleSection>,
}

/// Slug + title pair for the Learn index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
}

fn section(heading: Option<&str>, body: &str, bullets: &[&str]) -> ArticleSection {
    ArticleSection {
        heading: heading.map(String::from),
        body: body.to_string(),
        bullets: bullets.iter().map(|b| b.to_string()).collect(),
    }
}

fn article(slug: &str, title: &str, sections: Vec<ArticleSection>) -> Article {
    Article {
        slug: slug.to_string(),
        title: title.to_string(),
        sections,
    }
}

/// All Learn articles, in display order.
pub fn articles() -> Vec<Article> {
    vec![
        article(
            "what-is-parkinsons",
            "What is Parkinson's?",
            vec![section(
                None,
                "Parkinson's disease is a progressive disorder that is caused by degeneration of nerve cells in the part of the brain called the substantia nigra, which controls movement. Symptoms usually begin gradually and worsen over time. As the disease progresses, people may have difficulty walking and talking. They may also have mental and behavioral changes, sleep problems, depression, memory difficulties, and fatigue.",
                &[],
            )],
        ),
        article(
            "causes",
            "Causes",
            vec![section(
                None,
                "The most prominent signs and symptoms of Parkinson's occur when nerve cells in the basal ganglia, which control movement, become impaired or die. Normally these nerve cells produce dopamine; when they die or become impaired, less dopamine is produced, which causes the movement problems associated with the disease. Scientists still do not know what causes the neurons to die. Some cases appear hereditary, and some can be traced to specific genetic changes, but in most cases the disease occurs randomly.",
                &[],
            )],
        ),
        article(
            "diagnosis",
            "Diagnosis",
            vec![section(
                None,
                "There is currently no blood or laboratory test to diagnose non-genetic cases of Parkinson's. Doctors usually diagnose the disease by taking a person's medical history and performing a neurological examination. Drawing exercises such as spiral and wave tracing are used as supportive indicators of tremor and slowed movement. If symptoms improve after starting medication, that is another indicator the person has Parkinson's.",
                &[],
            )],
        ),
        article(
            "symptoms",
            "Symptoms",
            vec![section(
                None,
                "Parkinson's has four main symptoms, alongside other movement and non-movement changes that vary from person to person:",
                &[
                    "Tremor in hands, arms, legs, jaw, or head",
                    "Muscle stiffness, where muscle remains contracted for a long time",
                    "Slowness of movement",
                    "Impaired balance and coordination, sometimes leading to falls",
                ],
            )],
        ),
        article(
            "rating-scale",
            "Disease Rating Scale",
            vec![section(
                None,
                "Clinicians commonly stage Parkinson's with the Hoehn and Yahr scale, which describes how symptoms progress from one side of the body to both sides, and from no balance impairment through wheelchair- or bed-bound stages. Rating scales help track progression over time and compare the effect of treatment.",
                &[],
            )],
        ),
        article(
            "treatment",
            "Treatment",
            vec![
                section(
                    None,
                    "Medicines can help treat the symptoms of Parkinson's by:",
                    &[
                        "Increasing the level of dopamine in the brain",
                        "Having an effect on other brain chemicals, such as neurotransmitters, which transfer information between brain cells",
                        "Helping control non-movement symptoms",
                    ],
                ),
                section(
                    Some("Levodopa"),
                    "The main therapy for Parkinson's is levodopa. Nerve cells use levodopa to make dopamine to replenish the brain's dwindling supply. Usually, people take levodopa along with another medication called carbidopa. Carbidopa prevents or reduces some of the side effects of levodopa therapy and reduces the amount of levodopa needed to improve symptoms.\n\nPeople living with Parkinson's disease should never stop taking levodopa without telling their doctor. Suddenly stopping the drug may have serious side effects, like being unable to move or having difficulty breathing.",
                    &[],
                ),
                section(
                    Some("Other Medications"),
                    "The doctor may prescribe other medicines to treat Parkinson's symptoms, including:",
                    &[
                        "Dopamine agonists to stimulate the production of dopamine in the brain",
                        "Enzyme inhibitors (e.g., MAO-B inhibitors, COMT inhibitors) to increase the amount of dopamine by slowing down the enzymes that break down dopamine in the brain",
                        "Amantadine to help reduce involuntary movements",
                        "Anticholinergic drugs to reduce tremors and muscle rigidity",
                    ],
                ),
                section(
                    Some("Deep Brain Stimulation"),
                    "For people with Parkinson's disease who do not respond well to medications, the doctor may recommend deep brain stimulation. During a surgical procedure, a doctor implants electrodes into part of the brain and connects them to a small electrical device implanted in the chest. The device and electrodes painlessly stimulate specific areas in the brain that control movement in a way that may help stop many of the movement-related symptoms.",
                    &[],
                ),
                section(
                    Some("Other Therapies"),
                    "Other therapies that may help manage Parkinson's symptoms include:",
                    &[
                        "Physical, occupational, and speech therapies, which may help with gait and voice disorders, tremors and rigidity, and decline in mental functions",
                        "A healthy diet to support overall wellness",
                        "Exercises to strengthen muscles and improve balance, flexibility, and coordination",
                        "Massage therapy to reduce tension",
                        "Yoga and tai chi to increase stretching and flexibility",
                    ],
                ),
            ],
        ),
        article(
            "prevention",
            "Prevention",
            vec![section(
                None,
                "Because the cause of Parkinson's is unknown, there is no proven way to prevent the disease. Regular aerobic exercise and activities that challenge coordination and dexterity are associated with lower risk and slower symptom progression, which is why the app pairs education with dexterity games and tracking.",
                &[],
            )],
        ),
        article(
            "secondary-parkinsonism",
            "Secondary Parkinsonism",
            vec![section(
                None,
                "Secondary parkinsonism is when symptoms similar to Parkinson's disease are caused by certain medicines, a different nervous system disorder, or another illness such as stroke or repeated head injury. Unlike Parkinson's disease, some forms of secondary parkinsonism may stabilize or improve when the underlying cause is treated.",
                &[],
            )],
        ),
    ]
}

/// Slug + title index for the Learn list screen.
pub fn article_index() -> Vec<ArticleSummary> {
    articles()
        .into_iter()
        .map(|a| ArticleSummary {
            slug: a.slug,
            title: a.title,
        })
        .collect()
}

/// Looks an article up by slug.
pub fn article_by_slug(slug: &str) -> Option<Article> {
    articles().into_iter().find(|a| a.slug == slug)
}

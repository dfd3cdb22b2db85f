//! The bundled example record.

use crate::model::{
    Achievement, Certification, ContactInfo, Education, EntryId, Project, ResumeRecord,
    WorkExperience, SAMPLE_FULL_NAME,
};

const SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Python",
    "Java",
    "C++",
    "MongoDB",
    "PostgreSQL",
    "Git",
    "Docker",
    "AWS",
    "Machine Learning",
    "Data Structures",
    "Algorithms",
    "System Design",
    "Agile Development",
    "REST APIs",
    "GraphQL",
];

pub(crate) fn sample_record() -> ResumeRecord {
    ResumeRecord {
        contact: ContactInfo {
            full_name: SAMPLE_FULL_NAME.to_owned(),
            email: "amit.gupta@email.com".to_owned(),
            phone: "+91 98765 43210".to_owned(),
            location: "Mumbai, Maharashtra".to_owned(),
            website: "https://amitgupta.dev".to_owned(),
            linkedin: "linkedin.com/in/amit-gupta-dev".to_owned(),
            github: "github.com/amit-gupta".to_owned(),
        },
        summary: "Passionate 4th-year Computer Engineering student at Don Bosco Institute of \
                  Technology with strong foundation in full-stack development, data structures, \
                  and algorithms. Experienced in building scalable web applications using modern \
                  technologies. Seeking software engineering opportunities to contribute to \
                  innovative projects and grow professionally in the tech industry."
            .to_owned(),
        experience: vec![
            WorkExperience {
                id: EntryId::new("1"),
                company: "TechStart Solutions".to_owned(),
                position: "Software Development Intern".to_owned(),
                start_date: "2024-06".to_owned(),
                end_date: "2024-08".to_owned(),
                current: false,
                description: "Developed and maintained React-based web applications serving \
                              10,000+ users. Collaborated with senior developers to implement new \
                              features and optimize application performance by 25%. Participated \
                              in code reviews and agile development processes, contributing to 3 \
                              major product releases. Implemented responsive design principles \
                              and improved user experience metrics."
                    .to_owned(),
            },
            WorkExperience {
                id: EntryId::new("2"),
                company: "DBIT Innovation Lab".to_owned(),
                position: "Research Assistant".to_owned(),
                start_date: "2023-09".to_owned(),
                end_date: String::new(),
                current: true,
                description: "Leading a team of 4 students in developing machine learning models \
                              for predictive analytics. Published research paper on 'Optimizing \
                              Neural Networks for Edge Computing' in IEEE conference. Mentoring \
                              junior students in programming fundamentals and project \
                              development. Secured funding of ₹2,50,000 for research project from \
                              university grants."
                    .to_owned(),
            },
        ],
        education: vec![
            Education {
                id: EntryId::new("1"),
                institution: "Don Bosco Institute of Technology (DBIT)".to_owned(),
                degree: "Bachelor of Engineering".to_owned(),
                field: "Computer Engineering".to_owned(),
                start_date: "2021-08".to_owned(),
                end_date: "2025-05".to_owned(),
                gpa: "8.7/10.0".to_owned(),
            },
            Education {
                id: EntryId::new("2"),
                institution: "St. Xavier's Junior College".to_owned(),
                degree: "Higher Secondary Certificate".to_owned(),
                field: "Science (PCM)".to_owned(),
                start_date: "2019-06".to_owned(),
                end_date: "2021-03".to_owned(),
                gpa: "92.5%".to_owned(),
            },
        ],
        skills: SKILLS.iter().map(|skill| (*skill).to_owned()).collect(),
        projects: vec![
            Project {
                id: EntryId::new("1"),
                name: "EcoTrack - Carbon Footprint Tracker".to_owned(),
                description: "Full-stack web application helping users track and reduce their \
                              carbon footprint. Features include activity logging, analytics \
                              dashboard, and personalized recommendations. Implemented real-time \
                              data visualization using Chart.js and user authentication with JWT. \
                              Achieved 95% user satisfaction rating and 40% reduction in user \
                              carbon footprint."
                    .to_owned(),
                technologies: "React, Node.js, Express, MongoDB, Chart.js, JWT, AWS, Docker"
                    .to_owned(),
                link: "https://ecotrack-demo.vercel.app".to_owned(),
                github: "https://github.com/amit-gupta/ecotrack".to_owned(),
            },
            Project {
                id: EntryId::new("2"),
                name: "SmartLibrary Management System".to_owned(),
                description: "Comprehensive library management system with features for book \
                              cataloging, member management, and automated fine calculation. \
                              Includes QR code integration for quick book checkout and return \
                              processes. Reduced manual processing time by 60% and improved \
                              library efficiency. Deployed for 3 college libraries serving 5000+ \
                              students."
                    .to_owned(),
                technologies: "Java, Spring Boot, MySQL, Thymeleaf, Bootstrap, QR Code API"
                    .to_owned(),
                link: String::new(),
                github: "https://github.com/amit-gupta/smart-library".to_owned(),
            },
            Project {
                id: EntryId::new("3"),
                name: "AI-Powered Code Review Assistant".to_owned(),
                description: "Machine learning model that analyzes code quality and suggests \
                              improvements. Trained on 50,000+ code samples with 85% accuracy in \
                              detecting common programming issues and security vulnerabilities. \
                              Integrated with GitHub API for seamless workflow. Featured in \
                              university tech showcase and received recognition from industry \
                              experts."
                    .to_owned(),
                technologies: "Python, TensorFlow, Flask, Docker, GitHub API, NLP".to_owned(),
                link: String::new(),
                github: "https://github.com/amit-gupta/ai-code-reviewer".to_owned(),
            },
        ],
        achievements: vec![
            Achievement {
                id: EntryId::new("1"),
                title: "Winner - National Level Hackathon 'CodeFest 2024'".to_owned(),
                description: "Led a team of 4 to develop an innovative healthcare management \
                              system using AI and blockchain technology. Competed against 200+ \
                              teams from across India and secured first place with a cash prize \
                              of ₹1,00,000. Solution focused on secure patient data management \
                              and predictive health analytics."
                    .to_owned(),
                date: "2024-03".to_owned(),
                organization: "Indian Institute of Technology, Delhi".to_owned(),
            },
            Achievement {
                id: EntryId::new("2"),
                title: "Best Research Paper Award".to_owned(),
                description: "Received recognition for research paper on 'Optimizing Neural \
                              Networks for Edge Computing' at IEEE International Conference on \
                              Computer Science and Engineering. Paper cited by 15+ researchers and \
                              contributed to advancing edge computing research in India."
                    .to_owned(),
                date: "2024-01".to_owned(),
                organization: "IEEE Computer Society".to_owned(),
            },
            Achievement {
                id: EntryId::new("3"),
                title: "Dean's List - Academic Excellence".to_owned(),
                description: "Consistently maintained GPA above 8.5 for 6 consecutive semesters. \
                              Recognized for outstanding academic performance in Computer \
                              Engineering program. Received merit scholarship of ₹50,000 for \
                              academic excellence."
                    .to_owned(),
                date: "2023-12".to_owned(),
                organization: "Don Bosco Institute of Technology".to_owned(),
            },
            Achievement {
                id: EntryId::new("4"),
                title: "Google Summer of Code Participant".to_owned(),
                description: "Selected among top 1% of applicants worldwide to contribute to \
                              open-source project 'TensorFlow Lite'. Implemented optimization \
                              algorithms for mobile deployment, improving inference speed by 30%. \
                              Mentored by Google engineers and contributed 15+ commits to the main \
                              repository."
                    .to_owned(),
                date: "2023-08".to_owned(),
                organization: "Google".to_owned(),
            },
        ],
        certifications: vec![
            Certification {
                id: EntryId::new("1"),
                name: "AWS Certified Solutions Architect - Associate".to_owned(),
                issuer: "Amazon Web Services".to_owned(),
                date: "2024-02".to_owned(),
                expiry_date: "2027-02".to_owned(),
                credential_id: "AWS-ASA-2024-AG789".to_owned(),
                link: "https://aws.amazon.com/verification".to_owned(),
            },
            Certification {
                id: EntryId::new("2"),
                name: "Google Cloud Professional Cloud Developer".to_owned(),
                issuer: "Google Cloud".to_owned(),
                date: "2023-11".to_owned(),
                expiry_date: "2025-11".to_owned(),
                credential_id: "GCP-PCD-2023-AG456".to_owned(),
                link: "https://cloud.google.com/certification".to_owned(),
            },
            Certification {
                id: EntryId::new("3"),
                name: "Microsoft Azure Fundamentals (AZ-900)".to_owned(),
                issuer: "Microsoft".to_owned(),
                date: "2023-09".to_owned(),
                expiry_date: String::new(),
                credential_id: "MS-AZ900-2023-AG123".to_owned(),
                link: "https://docs.microsoft.com/en-us/learn/certifications".to_owned(),
            },
            Certification {
                id: EntryId::new("4"),
                name: "Oracle Certified Professional, Java SE 11 Developer".to_owned(),
                issuer: "Oracle".to_owned(),
                date: "2023-06".to_owned(),
                expiry_date: String::new(),
                credential_id: "OCP-JAVA11-2023-AG321".to_owned(),
                link: "https://education.oracle.com/certification".to_owned(),
            },
        ],
    }
}

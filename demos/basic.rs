use std::future::ready;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use pickme::Candidate;
use tokio::time;

fn delayed(value: Result<u32, &'static str>, millis: u64) -> BoxFuture<'static, Result<u32, &'static str>> {
    async move {
        time::sleep(Duration::from_millis(millis)).await;
        value
    }
    .boxed()
}

#[tokio::main]
pub async fn main() {
    env_logger::init();

    let output = pickme::pick([ready(Ok::<_, ()>(1)), ready(Ok(2))], |v| *v == 2).await;
    println!("match:           {:?}", output);

    let output = pickme::pick([ready(Ok::<_, ()>(1)), ready(Ok(2))], |v| *v == 3).await;
    println!("no match:        {:?}", output);

    let output = pickme::pick([ready(Err("x")), ready(Ok(42))], |v| *v == 42).await;
    println!("tolerates error: {:?}", output);

    let output = pickme::pick([ready(Err::<u32, _>("A")), ready(Err("B"))], |_| true).await;
    println!("all fail:        {:?}", output);

    let output = pickme::try_pick([Candidate::value(1)], |_| Err::<bool, _>("boom")).await;
    println!("selector fails:  {:?}", output);

    let output = pickme::pick(Vec::<Candidate<pickme::Immediate<u32>>>::new(), |_| true).await;
    println!("empty:           {:?}", output);

    let output = pickme::pick(vec![delayed(Ok(10), 100), delayed(Ok(20), 10)], |v| *v == 10).await;
    println!("slow but right:  {:?}", output);
}
